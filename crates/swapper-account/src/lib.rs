//! Account management module for the swap pipeline.
//!
//! This module provides the signing seam of the pipeline: an interface
//! for producing secp256k1 signatures over EIP-712 digests with the
//! owner's private key, and a stateless [`recover_signer`] that recovers
//! the signing address from a (digest, signature) pair without any key
//! material. The pipeline signs a permit through [`AccountService`] and
//! then independently verifies the signature through recovery before any
//! money-moving stage runs.
//!
//! Key material never leaves the account implementation; it enters as a
//! [`SecretString`] and is held by the signer, which exposes only signing
//! operations.

use alloy_primitives::{Address, PrimitiveSignature as Signature, B256};
use async_trait::async_trait;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when a signer address cannot be recovered.
	#[error("recovery failed: {0}")]
	RecoveryFailed(String),
}

/// Trait defining the interface for account implementations.
///
/// Implementations hold the private key and expose only its address and
/// a digest-signing operation.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Retrieves the address associated with this account.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs a 32-byte EIP-712 digest with the account's private key.
	async fn sign_digest(&self, digest: &B256) -> Result<Signature, AccountError>;
}

/// Recovers the address that produced `signature` over `digest`.
///
/// Stateless: needs no key material, which is what makes post-signing
/// verification independent of the signer.
pub fn recover_signer(digest: &B256, signature: &Signature) -> Result<Address, AccountError> {
	signature
		.recover_address_from_prehash(digest)
		.map_err(|e| AccountError::RecoveryFailed(e.to_string()))
}

/// Service that manages account operations.
///
/// Wraps an account implementation behind a uniform interface for the
/// pipeline.
pub struct AccountService {
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the address associated with the managed account.
	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.implementation.address().await
	}

	/// Signs a 32-byte EIP-712 digest with the managed account's key.
	pub async fn sign_digest(&self, digest: &B256) -> Result<Signature, AccountError> {
		self.implementation.sign_digest(digest).await
	}
}
