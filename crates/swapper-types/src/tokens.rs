//! Token value objects and amount scaling.
//!
//! A [`Token`] describes one ERC-20 contract on one chain. Tokens are
//! created when the pipeline configuration is assembled and never mutated
//! afterwards; identity is the (chain id, contract address) pair, so two
//! tokens with different display metadata but the same address compare
//! equal.
//!
//! Amounts are always carried as [`U256`] integers denominated in the
//! token's smallest unit. Human decimal amounts must be scaled through
//! [`Token::parse_amount`] (pure integer arithmetic) before they enter the
//! pipeline; no floating point is permitted anywhere.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::utils::parse_units;

/// Errors that can occur when scaling decimal amounts to base units.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
	/// The amount string contains something other than digits and one dot.
	#[error("invalid decimal amount: {0}")]
	InvalidAmount(String),
	/// More fractional digits were supplied than the token can represent.
	#[error("amount has more than {0} fractional digits")]
	PrecisionLoss(u8),
	/// The scaled amount does not fit in 256 bits.
	#[error("amount overflows 256 bits")]
	Overflow,
}

/// An ERC-20 token on a specific chain.
///
/// Equality and hashing consider only `(chain_id, address)`; decimals,
/// symbol and name are display metadata.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Chain the token contract is deployed on.
	pub chain_id: u64,
	/// The token contract address.
	pub address: Address,
	/// Number of decimal places of the smallest unit.
	pub decimals: u8,
	/// Short display symbol, e.g. "USDT".
	pub symbol: String,
	/// Full display name, e.g. "Tether USD".
	pub name: String,
}

impl Token {
	/// Creates a new token description.
	pub fn new(
		chain_id: u64,
		address: Address,
		decimals: u8,
		symbol: impl Into<String>,
		name: impl Into<String>,
	) -> Self {
		Self {
			chain_id,
			address,
			decimals,
			symbol: symbol.into(),
			name: name.into(),
		}
	}

	/// Scales a human decimal amount (e.g. "1.5") to this token's base
	/// units using pure integer arithmetic.
	pub fn parse_amount(&self, amount: &str) -> Result<U256, AmountError> {
		parse_units(amount, self.decimals)
	}
}

impl PartialEq for Token {
	fn eq(&self, other: &Self) -> bool {
		self.chain_id == other.chain_id && self.address == other.address
	}
}

impl Hash for Token {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.chain_id.hash(state);
		self.address.hash(state);
	}
}

/// Well-known mainnet tokens.
///
/// These mirror the token table the pipeline is typically configured with;
/// callers on other chains construct their own [`Token`] values.
pub mod mainnet {
	use super::Token;
	use alloy_primitives::address;

	/// Ethereum mainnet chain id.
	pub const CHAIN_ID: u64 = 1;

	/// Wrapped Ether.
	pub fn weth() -> Token {
		Token::new(
			CHAIN_ID,
			address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
			18,
			"WETH",
			"Wrapped Ether",
		)
	}

	/// Tether USD.
	pub fn usdt() -> Token {
		Token::new(
			CHAIN_ID,
			address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
			6,
			"USDT",
			"Tether USD",
		)
	}

	/// Dai Stablecoin.
	pub fn dai() -> Token {
		Token::new(
			CHAIN_ID,
			address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
			18,
			"DAI",
			"Dai Stablecoin",
		)
	}

	/// Uniswap governance token.
	pub fn uni() -> Token {
		Token::new(
			CHAIN_ID,
			address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
			18,
			"UNI",
			"Uniswap",
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_identity_ignores_metadata() {
		let mut a = mainnet::usdt();
		let b = mainnet::usdt();
		a.symbol = "XUSD".to_string();
		a.name = "Renamed".to_string();
		assert_eq!(a, b);
	}

	#[test]
	fn test_identity_distinguishes_chain() {
		let a = mainnet::usdt();
		let mut b = mainnet::usdt();
		b.chain_id = 5;
		assert_ne!(a, b);
	}

	#[test]
	fn test_parse_amount_uses_token_decimals() {
		let usdt = mainnet::usdt();
		assert_eq!(usdt.parse_amount("1").unwrap(), U256::from(1_000_000u64));
		assert_eq!(usdt.parse_amount("1.5").unwrap(), U256::from(1_500_000u64));

		let weth = mainnet::weth();
		assert_eq!(
			weth.parse_amount("2").unwrap(),
			U256::from(2_000_000_000_000_000_000u128)
		);
	}
}
