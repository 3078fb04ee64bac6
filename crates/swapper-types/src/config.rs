//! Pipeline configuration.
//!
//! One explicit, immutable [`Config`] is constructed at startup (directly
//! or from a TOML file) and passed by reference into every component
//! constructor. Pipeline stages never consult globals or the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::secret_string::SecretString;
use crate::utils::constants;
use alloy_primitives::Address;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Which router generation the swap executes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouterVariant {
	/// The Universal Router.
	#[default]
	Universal,
	/// SwapRouter02.
	#[serde(rename = "swap_router_02")]
	SwapRouter02,
}

/// Which Permit2 transfer scheme the pipeline signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermitKind {
	/// Allowance-based transfer (PermitSingle).
	#[default]
	Allowance,
	/// Signature-based one-shot transfer (PermitTransferFrom).
	Signature,
}

/// Immutable configuration for the swap pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	/// Chain the pipeline operates on.
	pub chain_id: u64,
	/// HTTP(S) JSON-RPC endpoint.
	pub rpc_url: String,
	/// The swap owner's address; signatures must recover to it.
	pub wallet_address: Address,
	/// The owner's private signing key.
	pub private_key: SecretString,
	/// Base URL of the routing service.
	pub routing_url: String,
	/// The Permit2 deployment to authorize against.
	#[serde(default = "default_permit2_address")]
	pub permit2_address: Address,
	/// Preferred router generation.
	#[serde(default)]
	pub router: RouterVariant,
	/// Explicit router address, overriding the per-chain lookup.
	#[serde(default)]
	pub router_address: Option<Address>,
	/// Which permit scheme to sign.
	#[serde(default)]
	pub permit_kind: PermitKind,
	/// Slippage tolerance in basis points. Defaults to 50 (0.5%).
	#[serde(default = "default_slippage_bps")]
	pub slippage_bps: u16,
	/// Permit and swap deadline horizon in seconds. Defaults to 30 minutes.
	#[serde(default = "default_permit_expiry_secs")]
	pub permit_expiry_secs: u64,
	/// Confirmations to wait for on the approval transaction.
	#[serde(default = "default_approval_confirmations")]
	pub approval_confirmations: u64,
	/// Upper bound in seconds on waiting for approval confirmation;
	/// expiry is treated the same as a reverted approval.
	#[serde(default = "default_approval_timeout_secs")]
	pub approval_timeout_secs: u64,
	/// Gas limit ceiling applied when the caller does not override it.
	#[serde(default = "default_gas_limit")]
	pub default_gas_limit: u64,
}

fn default_permit2_address() -> Address {
	constants::PERMIT2_ADDRESS
}

fn default_slippage_bps() -> u16 {
	50
}

fn default_permit_expiry_secs() -> u64 {
	1800
}

fn default_approval_confirmations() -> u64 {
	1
}

fn default_approval_timeout_secs() -> u64 {
	600
}

fn default_gas_limit() -> u64 {
	1_000_000
}

impl Config {
	/// Loads and validates a configuration from a TOML file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml_str(&contents)
	}

	/// Parses and validates a configuration from a TOML string.
	pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates invariants that serde cannot express.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.rpc_url.is_empty() {
			return Err(ConfigError::Validation("rpc_url must not be empty".into()));
		}
		if self.routing_url.is_empty() {
			return Err(ConfigError::Validation(
				"routing_url must not be empty".into(),
			));
		}
		if self.private_key.with_exposed(str::is_empty) {
			return Err(ConfigError::Validation(
				"private_key must not be empty".into(),
			));
		}
		if self.slippage_bps >= 10_000 {
			return Err(ConfigError::Validation(
				"slippage_bps must be below 10000".into(),
			));
		}
		if self.permit_expiry_secs == 0 {
			return Err(ConfigError::Validation(
				"permit_expiry_secs must be positive".into(),
			));
		}
		// Fail at startup rather than mid-pipeline when no router is known
		self.router_address()?;
		Ok(())
	}

	/// The router contract swaps execute through: the configured override,
	/// or the well-known address for the chain and variant.
	pub fn router_address(&self) -> Result<Address, ConfigError> {
		if let Some(address) = self.router_address {
			return Ok(address);
		}
		constants::router_address(self.router, self.chain_id).ok_or_else(|| {
			ConfigError::Validation(format!(
				"no {:?} router known for chain {}; set router_address",
				self.router, self.chain_id
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const MINIMAL: &str = r#"
chain_id = 1
rpc_url = "https://eth.example.com"
wallet_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
routing_url = "https://router.example.com"
"#;

	#[test]
	fn test_defaults_applied() {
		let config = Config::from_toml_str(MINIMAL).unwrap();
		assert_eq!(config.permit2_address, constants::PERMIT2_ADDRESS);
		assert_eq!(config.router, RouterVariant::Universal);
		assert_eq!(config.permit_kind, PermitKind::Allowance);
		assert_eq!(config.slippage_bps, 50);
		assert_eq!(config.permit_expiry_secs, 1800);
		assert_eq!(config.approval_confirmations, 1);
		assert_eq!(config.approval_timeout_secs, 600);
		assert_eq!(config.default_gas_limit, 1_000_000);
		assert_eq!(
			config.router_address().unwrap(),
			constants::MAINNET_UNIVERSAL_ROUTER
		);
	}

	#[test]
	fn test_router_variant_and_override() {
		let toml = format!(
			"{}router = \"swap_router_02\"\n",
			MINIMAL
		);
		let config = Config::from_toml_str(&toml).unwrap();
		assert_eq!(
			config.router_address().unwrap(),
			constants::MAINNET_SWAP_ROUTER_02
		);

		let toml = format!(
			"{}router_address = \"0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984\"\n",
			MINIMAL
		);
		let config = Config::from_toml_str(&toml).unwrap();
		assert_eq!(
			config.router_address().unwrap().to_string().to_lowercase(),
			"0x1f9840a85d5af5bf1d1762f925bdaddc4201f984"
		);
	}

	#[test]
	fn test_unknown_chain_requires_override() {
		let toml = MINIMAL.replace("chain_id = 1", "chain_id = 31337");
		assert!(matches!(
			Config::from_toml_str(&toml),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_validation_rejects_zero_expiry() {
		let toml = format!("{}permit_expiry_secs = 0\n", MINIMAL);
		assert!(matches!(
			Config::from_toml_str(&toml),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(MINIMAL.as_bytes()).unwrap();
		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.chain_id, 1);
	}
}
