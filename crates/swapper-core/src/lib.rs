//! Core orchestration for the permit2-swapper pipeline.
//!
//! This crate chains the money-moving stages of a single swap attempt in
//! their one legal order:
//!
//! 1. **Allowance gate** — ensure the Permit2 contract may move the
//!    source token, raising the allowance on-chain if needed.
//! 2. **Nonce source** — read the fresh permit nonce for the
//!    (owner, token, spender) triple.
//! 3. **Permit builder** — pure construction of the typed authorization.
//! 4. **Signer/verifier** — sign the permit's EIP-712 digest, then
//!    independently recover and check the signer before anything else
//!    may run.
//! 5. **Route resolver** — obtain execution calldata and a quote from
//!    the routing service.
//! 6. **Transaction assembler** — produce the ready-to-submit
//!    descriptor. Submission itself is deliberately outside this crate.
//!
//! Each stage consumes the previous stage's result type, so skipping a
//! stage is a compile-time error, not a runtime surprise; in particular
//! the route resolver takes a [`SignedPermit`](engine::SignedPermit),
//! which only the signer/verifier stage can mint. No stage retries
//! internally and nothing is rolled back: a raised allowance outliving a
//! failed attempt is safe and gets reused by the next one.

pub mod engine;

use alloy_primitives::Address;
use swapper_account::AccountError;
use swapper_chain::ChainError;
use swapper_router::RouterError;
use swapper_types::{ConfigError, TransactionHash};
use thiserror::Error;

pub use engine::{SwapEngine, SwapRequest};

/// Errors that can occur during a swap attempt.
///
/// Every failure is a distinct, inspectable value so a supervising caller
/// can decide whether to retry the whole attempt (with a fresh nonce and
/// fresh deadlines) or abort.
#[derive(Debug, Error)]
pub enum SwapError {
	/// The request is malformed (zero amount, wrong chain, same token
	/// on both sides).
	#[error("invalid swap request: {0}")]
	InvalidRequest(String),
	/// The approval transaction reverted or its confirmation timed out.
	#[error("approval failed: {reason}")]
	ApprovalFailed {
		/// Hash of the approval transaction, when one was submitted.
		tx_hash: Option<TransactionHash>,
		reason: String,
	},
	/// The permit nonce could not be read; the attempt may be retried.
	#[error("nonce lookup failed: {0}")]
	NonceLookupFailed(#[source] ChainError),
	/// The recovered signer does not match the configured owner. Either
	/// key misuse or a domain/schema mismatch; never proceed past it.
	#[error("signature verification failed: recovered {recovered}, expected {expected}")]
	SignatureVerificationFailed {
		recovered: Address,
		expected: Address,
	},
	/// The routing service found no viable path or quoted zero output.
	/// Not retried automatically: this reflects market state.
	#[error("route not found: {0}")]
	RouteNotFound(#[from] RouterError),
	/// The route response is structurally unusable.
	#[error("assembly error: {0}")]
	AssemblyError(String),
	/// Signing-key operations failed.
	#[error("account error: {0}")]
	Account(#[from] AccountError),
	/// A chain read failed outside the specifically-classified stages.
	#[error("chain error: {0}")]
	Chain(#[from] ChainError),
	/// The pipeline configuration is unusable.
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),
}
