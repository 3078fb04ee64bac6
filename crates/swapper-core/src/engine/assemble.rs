//! Transaction assembler: the terminal, transmit-nothing stage.
//!
//! Copies the route's calldata and native value verbatim into a
//! [`TransactionDescriptor`], takes the route's gas price estimate unless
//! the caller overrides it, and applies a generous fixed gas-limit
//! ceiling when no override is supplied. Estimating a tight limit is
//! deliberately out of scope; callers that need one pass their own.
//! Submission of the descriptor is an external concern.

use alloy_primitives::Address;
use swapper_types::{Config, Route, TransactionDescriptor};

use crate::SwapError;

/// Assembles the ready-to-submit swap transaction from a resolved route.
///
/// The route must target `destination` (the configured router); a
/// disagreement means the routing response is not for this pipeline's
/// router and is rejected as malformed.
pub fn assemble(
	config: &Config,
	route: &Route,
	destination: Address,
	sender: Address,
	gas_limit_override: Option<u64>,
) -> Result<TransactionDescriptor, SwapError> {
	if route.to != destination {
		return Err(SwapError::AssemblyError(format!(
			"route targets {} but the configured router is {}",
			route.to, destination
		)));
	}
	if route.calldata.is_empty() {
		return Err(SwapError::AssemblyError(
			"route carries empty calldata".into(),
		));
	}

	Ok(TransactionDescriptor {
		chain_id: config.chain_id,
		to: destination,
		data: route.calldata.clone(),
		value: route.value,
		from: sender,
		gas_price: route.gas_price_wei,
		gas_limit: gas_limit_override.unwrap_or(config.default_gas_limit),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Bytes, U256};
	use swapper_types::{Config, SecretString};

	const ROUTER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");
	const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

	fn config() -> Config {
		Config {
			chain_id: 1,
			rpc_url: "http://localhost:8545".into(),
			wallet_address: SENDER,
			private_key: SecretString::from("0x01"),
			routing_url: "http://localhost:8080".into(),
			permit2_address: swapper_types::utils::PERMIT2_ADDRESS,
			router: Default::default(),
			router_address: None,
			permit_kind: Default::default(),
			slippage_bps: 50,
			permit_expiry_secs: 1800,
			approval_confirmations: 1,
			approval_timeout_secs: 600,
			default_gas_limit: 1_000_000,
		}
	}

	fn route() -> Route {
		Route {
			quote_out: U256::from(42u64),
			calldata: Bytes::from(vec![0x35, 0x93, 0x56, 0x4c]),
			to: ROUTER,
			value: U256::from(7u64),
			gas_price_wei: 31_000_000_000,
		}
	}

	#[test]
	fn test_descriptor_copies_route_verbatim() {
		let descriptor = assemble(&config(), &route(), ROUTER, SENDER, None).unwrap();
		assert_eq!(descriptor.to, ROUTER);
		assert_eq!(descriptor.from, SENDER);
		assert_eq!(descriptor.data, route().calldata);
		assert_eq!(descriptor.value, U256::from(7u64));
		assert_eq!(descriptor.gas_price, 31_000_000_000);
		// Default ceiling applies when no override is supplied
		assert_eq!(descriptor.gas_limit, 1_000_000);
	}

	#[test]
	fn test_gas_limit_override() {
		let descriptor = assemble(&config(), &route(), ROUTER, SENDER, Some(350_000)).unwrap();
		assert_eq!(descriptor.gas_limit, 350_000);
	}

	#[test]
	fn test_rejects_foreign_destination() {
		let mut route = route();
		route.to = address!("68b3465833fb72A70ecDF485E0e4C7bD8665Fc45");
		assert!(matches!(
			assemble(&config(), &route, ROUTER, SENDER, None),
			Err(SwapError::AssemblyError(_))
		));
	}

	#[test]
	fn test_rejects_empty_calldata() {
		let mut route = route();
		route.calldata = Bytes::new();
		assert!(matches!(
			assemble(&config(), &route, ROUTER, SENDER, None),
			Err(SwapError::AssemblyError(_))
		));
	}
}
