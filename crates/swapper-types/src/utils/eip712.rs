//! EIP-712 hashing primitives for Permit2 structured data.
//!
//! These helpers provide:
//! - Domain hash computation for the Permit2 domain (name, chainId,
//!   verifyingContract; Permit2 carries no version field)
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for the static field types Permit2 structs use
//!
//! The type strings below are the canonical ones the Permit2 contract
//! hashes on-chain; any deviation produces a digest the contract will
//! reject, so they must never be reformatted.

use alloy_primitives::{keccak256, Address, B256, U256};

/// EIP-712 domain type used by Permit2 (no version field).
pub const DOMAIN_TYPE: &str = "EIP712Domain(string name,uint256 chainId,address verifyingContract)";
/// Domain name of the Permit2 contract.
pub const NAME_PERMIT2: &str = "Permit2";
/// Inner struct of the allowance-based permit.
pub const PERMIT_DETAILS_TYPE: &str =
	"PermitDetails(address token,uint160 amount,uint48 expiration,uint48 nonce)";
/// Outer struct of the allowance-based permit.
pub const PERMIT_SINGLE_TYPE: &str =
	"PermitSingle(PermitDetails details,address spender,uint256 sigDeadline)";
/// Inner struct of the signature-based permit.
pub const TOKEN_PERMISSIONS_TYPE: &str = "TokenPermissions(address token,uint256 amount)";
/// Outer struct of the signature-based permit.
pub const PERMIT_TRANSFER_FROM_TYPE: &str =
	"PermitTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline)";

/// Compute the Permit2 EIP-712 domain hash
/// (keccak256(abi.encode(typeHash, nameHash, chainId, verifyingContract))).
pub fn compute_domain_hash(name: &str, chain_id: u64, verifying_contract: &Address) -> B256 {
	let domain_type_hash = keccak256(DOMAIN_TYPE.as_bytes());
	let name_hash = keccak256(name.as_bytes());
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&domain_type_hash);
	enc.push_b256(&name_hash);
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_contract);
	keccak256(enc.finish())
}

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for the static types used in Permit2 struct hashing.
///
/// Every value occupies one 32-byte word; integers are big-endian
/// right-aligned and addresses are left-padded with 12 zero bytes, exactly
/// as `abi.encode` lays them out.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	/// Encodes a uint48 value (carried as u64 off-chain) as one word.
	pub fn push_u48(&mut self, v: u64) {
		let mut word = [0u8; 32];
		word[24..].copy_from_slice(&v.to_be_bytes());
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_encoder_word_alignment() {
		let addr = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
		let mut enc = Eip712AbiEncoder::new();
		enc.push_address(&addr);
		enc.push_u48(7);
		let words = enc.finish();
		assert_eq!(words.len(), 64);
		// Address is left-padded with 12 zero bytes
		assert_eq!(&words[..12], &[0u8; 12]);
		assert_eq!(&words[12..32], addr.as_slice());
		// uint48 is right-aligned in its word
		assert_eq!(&words[32..63], &[0u8; 31]);
		assert_eq!(words[63], 7);
	}

	#[test]
	fn test_domain_hash_binds_chain_and_contract() {
		let permit2 = crate::utils::PERMIT2_ADDRESS;
		let mainnet = compute_domain_hash(NAME_PERMIT2, 1, &permit2);
		let base = compute_domain_hash(NAME_PERMIT2, 8453, &permit2);
		assert_ne!(mainnet, base);

		let other_contract = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");
		assert_ne!(mainnet, compute_domain_hash(NAME_PERMIT2, 1, &other_contract));
	}

	#[test]
	fn test_final_digest_is_deterministic() {
		let domain = B256::repeat_byte(0x11);
		let structure = B256::repeat_byte(0x22);
		assert_eq!(
			compute_final_digest(&domain, &structure),
			compute_final_digest(&domain, &structure)
		);
		assert_ne!(
			compute_final_digest(&domain, &structure),
			compute_final_digest(&structure, &domain)
		);
	}
}
