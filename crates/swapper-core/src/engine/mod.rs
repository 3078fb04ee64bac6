//! The swap engine: one sequential pass over the pipeline stages.
//!
//! A [`SwapEngine`] is constructed once from the immutable configuration
//! and the three collaborator services (chain access, account, router)
//! and then executes independent swap attempts. Within one attempt every
//! network operation is awaited before the next begins; nothing runs
//! concurrently and nothing is cached between attempts — allowance and
//! nonce are externally-owned counters and are re-read fresh every time.
//!
//! The stage ordering is enforced by types, not discipline: the route
//! resolver takes the [`SignedPermit`] only the signer/verifier stage can
//! produce, and the assembler takes the resolved [`Route`]. Failures
//! surface as distinct [`SwapError`](crate::SwapError) values and leave
//! any raised allowance in place for the next attempt to reuse.

pub mod allowance;
pub mod assemble;
pub mod permit;

use alloy_primitives::{Address, U256};
use std::sync::Arc;
use swapper_account::AccountService;
use swapper_chain::ChainService;
use swapper_router::RouterService;
use swapper_types::{
	Config, Route, RouteRequest, Token, TradeKind, TransactionDescriptor,
};

use crate::SwapError;
pub use allowance::{AllowanceGate, MAX_ALLOWANCE};
pub use assemble::assemble;
pub use permit::{build_permit, PermitSigner, SignedPermit};

/// One swap attempt: sell `amount` base units of `token_in` for
/// `token_out`.
///
/// The single `amount` field is what both the permit builder and the
/// route resolver read, which is what makes a permit/route amount
/// mismatch structurally impossible.
#[derive(Debug, Clone)]
pub struct SwapRequest {
	/// Token being sold.
	pub token_in: Token,
	/// Token being bought.
	pub token_out: Token,
	/// Exact input amount in `token_in` base units.
	pub amount: U256,
}

/// Executes swap attempts through the staged pipeline.
pub struct SwapEngine {
	config: Arc<Config>,
	chain: Arc<ChainService>,
	account: Arc<AccountService>,
	router: Arc<RouterService>,
	/// Router contract resolved once at construction; permit spender and
	/// transaction destination.
	router_address: Address,
}

impl SwapEngine {
	/// Creates an engine over the given collaborators.
	///
	/// Fails when the configuration cannot name a router contract for
	/// its chain.
	pub fn new(
		config: Arc<Config>,
		chain: Arc<ChainService>,
		account: Arc<AccountService>,
		router: Arc<RouterService>,
	) -> Result<Self, SwapError> {
		let router_address = config.router_address()?;
		Ok(Self {
			config,
			chain,
			account,
			router,
			router_address,
		})
	}

	/// Runs one full swap attempt and returns the ready-to-submit
	/// transaction descriptor. Equivalent to
	/// [`execute_with_gas_limit`](Self::execute_with_gas_limit) with the
	/// configured gas ceiling.
	pub async fn execute(&self, request: &SwapRequest) -> Result<TransactionDescriptor, SwapError> {
		self.execute_with_gas_limit(request, None).await
	}

	/// Runs one full swap attempt, optionally pinning the gas limit of
	/// the assembled transaction.
	pub async fn execute_with_gas_limit(
		&self,
		request: &SwapRequest,
		gas_limit: Option<u64>,
	) -> Result<TransactionDescriptor, SwapError> {
		self.validate_request(request)?;

		let gate = AllowanceGate::new(&self.config, &self.chain);
		let allowance = gate.ensure(&request.token_in, request.amount).await?;
		tracing::debug!(allowance = %allowance, "allowance gate passed");

		let nonce = self.next_nonce(&request.token_in).await?;

		let permit = build_permit(
			self.config.permit_kind,
			&request.token_in,
			request.amount,
			self.router_address,
			nonce,
			self.config.permit_expiry_secs,
		)?;

		let signer = PermitSigner::new(&self.config, &self.account);
		let signed = signer.sign(permit).await?;

		let route = self.resolve_route(request, &signed).await?;

		assemble(
			&self.config,
			&route,
			self.router_address,
			self.config.wallet_address,
			gas_limit,
		)
	}

	/// Reads the fresh permit nonce for this attempt. Never cached:
	/// earlier permits may have advanced the counter.
	async fn next_nonce(&self, token: &Token) -> Result<u64, SwapError> {
		let nonce = self
			.chain
			.permit_nonce(
				self.config.wallet_address,
				token.address,
				self.router_address,
			)
			.await
			.map_err(SwapError::NonceLookupFailed)?;
		tracing::debug!(nonce, token = %token.symbol, "fresh permit nonce");
		Ok(nonce)
	}

	/// Asks the routing service for the execution plan, carrying the
	/// exact permit/signature pair produced by the signing stage.
	async fn resolve_route(
		&self,
		request: &SwapRequest,
		signed: &SignedPermit,
	) -> Result<Route, SwapError> {
		let route_request = RouteRequest {
			token_in: request.token_in.clone(),
			token_out: request.token_out.clone(),
			amount: request.amount,
			kind: TradeKind::ExactInput,
			recipient: self.config.wallet_address,
			slippage_bps: self.config.slippage_bps,
			deadline: signed.permit().sig_deadline(),
		};
		let route = self
			.router
			.find_route(&route_request, signed.permit(), signed.signature())
			.await?;
		Ok(route)
	}

	fn validate_request(&self, request: &SwapRequest) -> Result<(), SwapError> {
		if request.amount.is_zero() {
			return Err(SwapError::InvalidRequest(
				"swap amount must be positive".into(),
			));
		}
		if request.token_in.chain_id != self.config.chain_id
			|| request.token_out.chain_id != self.config.chain_id
		{
			return Err(SwapError::InvalidRequest(format!(
				"tokens must live on configured chain {}",
				self.config.chain_id
			)));
		}
		if request.token_in == request.token_out {
			return Err(SwapError::InvalidRequest(
				"source and destination tokens are identical".into(),
			));
		}
		Ok(())
	}
}
