//! Route resolution module for the swap pipeline.
//!
//! The pipeline does not price swaps itself; it delegates to an external
//! routing service that optimizes over on-chain liquidity and answers
//! with execution calldata, an expected output quote and a gas price
//! estimate. This module defines the routing seam and the service wrapper
//! that enforces the one invariant the pipeline insists on: a usable
//! route quotes a strictly positive output. Zero-output quotes and
//! service errors are both terminal for the attempt — they reflect
//! market and liquidity state, not transient faults, so nothing here
//! retries.

use alloy_primitives::PrimitiveSignature as Signature;
use async_trait::async_trait;
use swapper_types::{format_units, Permit, Route, RouteRequest};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

/// Errors that can occur during route resolution.
#[derive(Debug, Error)]
pub enum RouterError {
	/// The service answered but found no viable path (or quoted zero).
	#[error("no route: {0}")]
	NoRoute(String),
	/// The service could not be reached.
	#[error("routing service unreachable: {0}")]
	Service(String),
	/// The service answered with something that does not parse.
	#[error("malformed route response: {0}")]
	InvalidResponse(String),
}

/// Trait defining the interface for routing service clients.
#[async_trait]
pub trait RouterInterface: Send + Sync {
	/// Requests an execution route for the swap described by `request`,
	/// carrying the signed permit that authorizes the input transfer.
	async fn route(
		&self,
		request: &RouteRequest,
		permit: &Permit,
		signature: &Signature,
	) -> Result<Route, RouterError>;
}

/// Service that manages route resolution.
///
/// Wraps a routing client and rejects degenerate routes before they can
/// reach transaction assembly.
pub struct RouterService {
	implementation: Box<dyn RouterInterface>,
}

impl RouterService {
	/// Creates a new RouterService with the specified implementation.
	pub fn new(implementation: Box<dyn RouterInterface>) -> Self {
		Self { implementation }
	}

	/// Resolves a route and enforces the non-zero-quote invariant.
	pub async fn find_route(
		&self,
		request: &RouteRequest,
		permit: &Permit,
		signature: &Signature,
	) -> Result<Route, RouterError> {
		let route = self.implementation.route(request, permit, signature).await?;

		if route.quote_out.is_zero() {
			return Err(RouterError::NoRoute(format!(
				"zero output quoted for {} -> {}",
				request.token_in.symbol, request.token_out.symbol
			)));
		}

		tracing::info!(
			amount_in = %format_units(request.amount, request.token_in.decimals),
			token_in = %request.token_in.symbol,
			quote_out = %format_units(route.quote_out, request.token_out.decimals),
			token_out = %request.token_out.symbol,
			"route resolved"
		);

		Ok(route)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Bytes, U256};
	use swapper_types::{tokens::mainnet, TradeKind};

	struct FixedQuoteRouter {
		quote: U256,
	}

	#[async_trait]
	impl RouterInterface for FixedQuoteRouter {
		async fn route(
			&self,
			request: &RouteRequest,
			_permit: &Permit,
			_signature: &Signature,
		) -> Result<Route, RouterError> {
			Ok(Route {
				quote_out: self.quote,
				calldata: Bytes::from(vec![0x01, 0x02]),
				to: request.recipient,
				value: U256::ZERO,
				gas_price_wei: 30_000_000_000,
			})
		}
	}

	fn request() -> RouteRequest {
		RouteRequest {
			token_in: mainnet::usdt(),
			token_out: mainnet::weth(),
			amount: U256::from(1_000_000u64),
			kind: TradeKind::ExactInput,
			recipient: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
			slippage_bps: 50,
			deadline: 1_900_000_000,
		}
	}

	fn permit_and_signature() -> (Permit, Signature) {
		let permit = Permit::Signature(swapper_types::PermitTransferFrom {
			permitted: swapper_types::TokenPermissions {
				token: mainnet::usdt().address,
				amount: U256::from(1_000_000u64),
			},
			spender: address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD"),
			nonce: 0,
			deadline: 1_900_000_000,
		});
		// r = s = 1; structurally valid, never verified here
		let signature = Signature::new(U256::from(1), U256::from(1), false);
		(permit, signature)
	}

	#[tokio::test]
	async fn test_positive_quote_passes() {
		let service = RouterService::new(Box::new(FixedQuoteRouter {
			quote: U256::from(42u64),
		}));
		let (permit, signature) = permit_and_signature();
		let route = service
			.find_route(&request(), &permit, &signature)
			.await
			.unwrap();
		assert_eq!(route.quote_out, U256::from(42u64));
	}

	#[tokio::test]
	async fn test_zero_quote_is_no_route() {
		let service = RouterService::new(Box::new(FixedQuoteRouter { quote: U256::ZERO }));
		let (permit, signature) = permit_and_signature();
		let result = service.find_route(&request(), &permit, &signature).await;
		assert!(matches!(result, Err(RouterError::NoRoute(_))));
	}
}
