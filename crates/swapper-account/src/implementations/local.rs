//! Local in-memory account implementation.
//!
//! Holds a secp256k1 private key parsed from a [`SecretString`] and signs
//! digests with it directly. Suitable for a wallet key supplied through
//! configuration; remote signers (HSM, KMS) would be separate
//! implementations of the same interface.

use alloy_primitives::{Address, PrimitiveSignature as Signature, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use swapper_types::SecretString;

use crate::{AccountError, AccountInterface};

/// Account backed by a locally-held private key.
pub struct LocalAccount {
	signer: PrivateKeySigner,
}

impl LocalAccount {
	/// Parses a private key (hex, with or without 0x prefix) into a
	/// local account.
	pub fn from_key(key: &SecretString) -> Result<Self, AccountError> {
		let signer = key.with_exposed(|k| {
			k.parse::<PrivateKeySigner>()
				.map_err(|_| AccountError::InvalidKey("not a valid secp256k1 key".into()))
		})?;
		Ok(Self { signer })
	}

	/// Generates a throwaway account with a random key, for tests and
	/// local development.
	pub fn random() -> Self {
		Self {
			signer: PrivateKeySigner::random(),
		}
	}
}

#[async_trait]
impl AccountInterface for LocalAccount {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address())
	}

	async fn sign_digest(&self, digest: &B256) -> Result<Signature, AccountError> {
		self.signer
			.sign_hash(digest)
			.await
			.map_err(|e| AccountError::SigningFailed(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{recover_signer, AccountService};
	use alloy_primitives::keccak256;

	#[tokio::test]
	async fn test_sign_recover_round_trip() {
		let account = LocalAccount::random();
		let service = AccountService::new(Box::new(account));
		let owner = service.get_address().await.unwrap();

		let digest = keccak256(b"structured data digest");
		let signature = service.sign_digest(&digest).await.unwrap();

		assert_eq!(recover_signer(&digest, &signature).unwrap(), owner);
	}

	#[tokio::test]
	async fn test_recovery_fails_for_mutated_digest() {
		let account = LocalAccount::random();
		let owner = account.address().await.unwrap();

		let digest = keccak256(b"original");
		let signature = account.sign_digest(&digest).await.unwrap();

		// Recovery over a different digest yields a different address (or
		// fails outright); either way verification against `owner` fails.
		let tampered = keccak256(b"tampered");
		match recover_signer(&tampered, &signature) {
			Ok(recovered) => assert_ne!(recovered, owner),
			Err(AccountError::RecoveryFailed(_)) => {}
			Err(other) => panic!("unexpected error: {other}"),
		}
	}

	#[tokio::test]
	async fn test_from_key_rejects_garbage() {
		let result = LocalAccount::from_key(&SecretString::from("not-a-key"));
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[tokio::test]
	async fn test_from_key_parses_known_key() {
		// Well-known local development key
		let key = SecretString::from(
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		);
		let account = LocalAccount::from_key(&key).unwrap();
		let address = account.address().await.unwrap();
		assert_eq!(
			address.to_string().to_lowercase(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}
}
