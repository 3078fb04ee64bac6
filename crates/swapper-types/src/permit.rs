//! Permit value objects for the two Permit2 transfer schemes.
//!
//! Permit2 supports two authorization shapes: the allowance-based
//! [`PermitSingle`] (an amount the spender may move until an expiration,
//! tracked by an on-chain nonce per (owner, token, spender) triple) and
//! the signature-based [`PermitTransferFrom`] (a one-shot transfer
//! authorization with an unordered nonce). Both are representable here as
//! the closed [`Permit`] enum; the pipeline is parameterized over which
//! variant is active via configuration.
//!
//! A permit is built fresh for every swap attempt and signed exactly once.
//! Its EIP-712 digest is produced by [`Permit::signing_hash`]; mutating
//! any field after signing yields a different digest, which is what makes
//! post-hoc signature verification meaningful.

use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::utils::eip712::{
	compute_domain_hash, compute_final_digest, Eip712AbiEncoder, NAME_PERMIT2,
	PERMIT_DETAILS_TYPE, PERMIT_SINGLE_TYPE, PERMIT_TRANSFER_FROM_TYPE, TOKEN_PERMISSIONS_TYPE,
};

/// Inner details of an allowance-based permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitDetails {
	/// The ERC-20 token being authorized.
	pub token: Address,
	/// Maximum amount the spender may move (uint160 on-chain).
	pub amount: U256,
	/// UNIX timestamp after which the allowance is void (uint48 on-chain).
	pub expiration: u64,
	/// Per-(owner, token, spender) counter (uint48 on-chain).
	pub nonce: u64,
}

/// Allowance-based permit: one token allowance plus a signature deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitSingle {
	pub details: PermitDetails,
	/// The contract permissioned to move the tokens.
	pub spender: Address,
	/// UNIX timestamp after which the signature itself is void.
	pub sig_deadline: u64,
}

/// Token/amount pair of a signature-based permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPermissions {
	pub token: Address,
	pub amount: U256,
}

/// Signature-based one-shot transfer permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitTransferFrom {
	pub permitted: TokenPermissions,
	/// The contract permissioned to move the tokens.
	pub spender: Address,
	/// Unordered nonce; consumed on execution.
	pub nonce: u64,
	/// UNIX timestamp after which the permit is void.
	pub deadline: u64,
}

/// Closed set of permit schemes the pipeline can produce.
///
/// Serialization is untagged: each variant's field shape is distinct, and
/// the routing service expects the flat Permit2 object shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permit {
	/// Allowance-based transfer ([`PermitSingle`]).
	Allowance(PermitSingle),
	/// Signature-based transfer ([`PermitTransferFrom`]).
	Signature(PermitTransferFrom),
}

impl Permit {
	/// The exact amount this permit authorizes.
	pub fn amount(&self) -> U256 {
		match self {
			Permit::Allowance(p) => p.details.amount,
			Permit::Signature(p) => p.permitted.amount,
		}
	}

	/// The token this permit authorizes spending of.
	pub fn token(&self) -> Address {
		match self {
			Permit::Allowance(p) => p.details.token,
			Permit::Signature(p) => p.permitted.token,
		}
	}

	/// The spender the permit is addressed to.
	pub fn spender(&self) -> Address {
		match self {
			Permit::Allowance(p) => p.spender,
			Permit::Signature(p) => p.spender,
		}
	}

	/// The replay-protection nonce embedded in the permit.
	pub fn nonce(&self) -> u64 {
		match self {
			Permit::Allowance(p) => p.details.nonce,
			Permit::Signature(p) => p.nonce,
		}
	}

	/// UNIX timestamp after which the authorization is void.
	pub fn expiration(&self) -> u64 {
		match self {
			Permit::Allowance(p) => p.details.expiration,
			Permit::Signature(p) => p.deadline,
		}
	}

	/// UNIX timestamp after which the signature is void.
	pub fn sig_deadline(&self) -> u64 {
		match self {
			Permit::Allowance(p) => p.sig_deadline,
			Permit::Signature(p) => p.deadline,
		}
	}

	/// EIP-712 struct hash of this permit per the Permit2 type schema.
	pub fn struct_hash(&self) -> B256 {
		match self {
			Permit::Allowance(p) => {
				let details_type_hash = keccak256(PERMIT_DETAILS_TYPE.as_bytes());
				let mut enc = Eip712AbiEncoder::new();
				enc.push_b256(&details_type_hash);
				enc.push_address(&p.details.token);
				enc.push_u256(p.details.amount);
				enc.push_u48(p.details.expiration);
				enc.push_u48(p.details.nonce);
				let details_hash = keccak256(enc.finish());

				let single_type_hash = keccak256(
					format!("{}{}", PERMIT_SINGLE_TYPE, PERMIT_DETAILS_TYPE).as_bytes(),
				);
				let mut enc = Eip712AbiEncoder::new();
				enc.push_b256(&single_type_hash);
				enc.push_b256(&details_hash);
				enc.push_address(&p.spender);
				enc.push_u256(U256::from(p.sig_deadline));
				keccak256(enc.finish())
			}
			Permit::Signature(p) => {
				let permissions_type_hash = keccak256(TOKEN_PERMISSIONS_TYPE.as_bytes());
				let mut enc = Eip712AbiEncoder::new();
				enc.push_b256(&permissions_type_hash);
				enc.push_address(&p.permitted.token);
				enc.push_u256(p.permitted.amount);
				let permissions_hash = keccak256(enc.finish());

				let transfer_type_hash = keccak256(
					format!("{}{}", PERMIT_TRANSFER_FROM_TYPE, TOKEN_PERMISSIONS_TYPE).as_bytes(),
				);
				let mut enc = Eip712AbiEncoder::new();
				enc.push_b256(&transfer_type_hash);
				enc.push_b256(&permissions_hash);
				enc.push_address(&p.spender);
				enc.push_u256(U256::from(p.nonce));
				enc.push_u256(U256::from(p.deadline));
				keccak256(enc.finish())
			}
		}
	}

	/// Final EIP-712 signing digest, bound to the Permit2 deployment on
	/// the given chain.
	pub fn signing_hash(&self, permit2: Address, chain_id: u64) -> B256 {
		let domain_hash = compute_domain_hash(NAME_PERMIT2, chain_id, &permit2);
		compute_final_digest(&domain_hash, &self.struct_hash())
	}
}
