//! Common types module for the permit2-swapper pipeline.
//!
//! This module defines the core data types and structures shared by the
//! swap pipeline crates. It provides a centralized location for value
//! objects (tokens, permits, routes, transactions), the pipeline
//! configuration, and secret handling, to ensure consistency across all
//! components.

/// Immutable pipeline configuration, constructed once at startup.
pub mod config;
/// Permit value objects for both Permit2 transfer schemes.
pub mod permit;
/// Route resolution request/response types.
pub mod route;
/// Secure string type for private key material.
pub mod secret_string;
/// Token value objects and integer amount scaling.
pub mod tokens;
/// Transaction types for blockchain interactions.
pub mod transaction;
/// Utility functions for EIP-712 hashing and formatting.
pub mod utils;

// Re-export all types for convenient access
pub use config::{Config, ConfigError, PermitKind, RouterVariant};
pub use permit::{Permit, PermitDetails, PermitSingle, PermitTransferFrom, TokenPermissions};
pub use route::{Route, RouteRequest, TradeKind};
pub use secret_string::SecretString;
pub use tokens::{AmountError, Token};
pub use transaction::{
	Transaction, TransactionDescriptor, TransactionHash, TransactionReceipt,
};
pub use utils::{current_timestamp, format_units, parse_units};
