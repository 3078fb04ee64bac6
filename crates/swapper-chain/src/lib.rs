//! Chain access module for the swap pipeline.
//!
//! This module is the pipeline's only window onto on-chain state. It
//! provides the ERC-20 allowance read the Allowance Gate starts from, the
//! approval submission and confirmation wait that raise it, the Permit2
//! nonce read the Nonce Source relies on, and the gas price feed. All
//! reads are uncached: allowance and nonce are externally-owned counters
//! that other actors may advance, so every swap attempt re-reads them
//! fresh.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::time::Duration;
use swapper_types::{Transaction, TransactionHash, TransactionReceipt};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur during chain access operations.
#[derive(Debug, Error)]
pub enum ChainError {
	/// Error that occurs during network communication.
	#[error("network error: {0}")]
	Network(String),
	/// Error that occurs when a submitted transaction cannot be delivered.
	#[error("transaction failed: {0}")]
	TransactionFailed(String),
	/// Error that occurs when a confirmation wait exceeds its deadline.
	#[error("timed out after {0:?} waiting for confirmation of {1}")]
	ConfirmationTimeout(Duration, TransactionHash),
	/// Error that occurs when an RPC response cannot be decoded.
	#[error("invalid response: {0}")]
	InvalidResponse(String),
}

/// Trait defining the interface for chain access implementations.
#[async_trait]
pub trait ChainInterface: Send + Sync {
	/// Reads the ERC-20 allowance `spender` currently holds over
	/// `owner`'s balance of `token`.
	async fn erc20_allowance(
		&self,
		token: Address,
		owner: Address,
		spender: Address,
	) -> Result<U256, ChainError>;

	/// Reads the next permit nonce Permit2 tracks for the
	/// (owner, token, spender) triple.
	async fn permit_nonce(
		&self,
		owner: Address,
		token: Address,
		spender: Address,
	) -> Result<u64, ChainError>;

	/// Signs and submits a transaction, returning its hash.
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, ChainError>;

	/// Blocks until the transaction has the requested confirmations or
	/// the timeout elapses.
	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, ChainError>;
}

/// Service that manages chain access for the pipeline.
///
/// Thin delegation layer over a chain implementation; keeping the seam
/// here lets the pipeline be driven against a mock chain in tests.
pub struct ChainService {
	implementation: Box<dyn ChainInterface>,
}

impl ChainService {
	/// Creates a new ChainService with the specified implementation.
	pub fn new(implementation: Box<dyn ChainInterface>) -> Self {
		Self { implementation }
	}

	/// Reads the ERC-20 allowance for an (owner, spender) pair.
	pub async fn erc20_allowance(
		&self,
		token: Address,
		owner: Address,
		spender: Address,
	) -> Result<U256, ChainError> {
		self.implementation
			.erc20_allowance(token, owner, spender)
			.await
	}

	/// Reads the next Permit2 nonce for an (owner, token, spender) triple.
	pub async fn permit_nonce(
		&self,
		owner: Address,
		token: Address,
		spender: Address,
	) -> Result<u64, ChainError> {
		self.implementation.permit_nonce(owner, token, spender).await
	}

	/// Signs and submits a transaction.
	pub async fn submit(&self, tx: Transaction) -> Result<TransactionHash, ChainError> {
		self.implementation.submit(tx).await
	}

	/// Waits for a transaction to reach the requested confirmations.
	pub async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, ChainError> {
		self.implementation
			.wait_for_confirmation(hash, confirmations, timeout)
			.await
	}
}
