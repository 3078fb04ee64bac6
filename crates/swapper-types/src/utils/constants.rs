//! Well-known contract addresses used by the swap pipeline.
//!
//! The Permit2 contract is deployed at the same deterministic address on
//! every EVM chain. Router addresses differ per chain and per router
//! generation, so they are resolved through [`router_address`]; chains not
//! listed here must supply an explicit override in the configuration.

use alloy_primitives::{address, Address};

use crate::config::RouterVariant;

/// Canonical Permit2 contract address (identical on all EVM chains).
pub const PERMIT2_ADDRESS: Address = address!("000000000022D473030F116dDEE9F6B43aC78BA3");

/// Universal Router on Ethereum mainnet.
pub const MAINNET_UNIVERSAL_ROUTER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");

/// SwapRouter02 on Ethereum mainnet.
pub const MAINNET_SWAP_ROUTER_02: Address = address!("68b3465833fb72A70ecDF485E0e4C7bD8665Fc45");

/// Resolves the router contract address for a chain, if known.
pub fn router_address(variant: RouterVariant, chain_id: u64) -> Option<Address> {
	match (variant, chain_id) {
		(RouterVariant::Universal, 1) => Some(MAINNET_UNIVERSAL_ROUTER),
		(RouterVariant::SwapRouter02, 1) => Some(MAINNET_SWAP_ROUTER_02),
		_ => None,
	}
}
