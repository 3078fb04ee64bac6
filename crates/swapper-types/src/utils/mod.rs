//! Utility functions shared across the swap pipeline.
//!
//! This module provides EIP-712 hashing primitives, integer amount
//! scaling/formatting, well-known contract addresses, and small helpers
//! used throughout the pipeline crates.

pub mod constants;
pub mod eip712;
pub mod formatting;
pub mod helpers;

pub use constants::{router_address, PERMIT2_ADDRESS};
pub use eip712::{
	compute_domain_hash, compute_final_digest, Eip712AbiEncoder, DOMAIN_TYPE, NAME_PERMIT2,
	PERMIT_DETAILS_TYPE, PERMIT_SINGLE_TYPE, PERMIT_TRANSFER_FROM_TYPE, TOKEN_PERMISSIONS_TYPE,
};
pub use formatting::{format_units, parse_units};
pub use helpers::current_timestamp;
