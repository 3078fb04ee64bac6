//! Transaction types for blockchain interactions.
//!
//! [`Transaction`] is the internal shape handed to the chain access layer
//! for submission (today only the approval raise); it converts into an
//! alloy [`TransactionRequest`] at the RPC boundary.
//! [`TransactionDescriptor`] is the terminal artifact of the pipeline: a
//! fully-assembled, ready-to-submit swap transaction whose ownership ends
//! at hand-off to the external submitter.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A transaction to be signed and submitted by the chain access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	/// Chain the transaction targets.
	pub chain_id: u64,
	/// Recipient contract; `None` would deploy, which the pipeline never does.
	pub to: Option<Address>,
	/// ABI-encoded calldata.
	pub data: Vec<u8>,
	/// Native value to attach.
	pub value: U256,
	/// Gas limit, if the caller wants to pin one.
	pub gas_limit: Option<u64>,
	/// Legacy gas price in wei, if the caller wants to pin one.
	pub gas_price: Option<u128>,
	/// Account nonce, if the caller wants to pin one.
	pub nonce: Option<u64>,
}

impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		let mut request = TransactionRequest::default()
			.value(tx.value)
			.input(tx.data.into());
		if let Some(to) = tx.to {
			request = request.to(to);
		}
		request.chain_id = Some(tx.chain_id);
		request.gas = tx.gas_limit;
		request.gas_price = tx.gas_price;
		request.nonce = tx.nonce;
		request
	}
}

/// Hash of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHash(pub B256);

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}

/// Ready-to-submit swap transaction.
///
/// Terminal artifact of the pipeline; the core assembles it and hands it
/// off without transmitting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDescriptor {
	/// Chain the swap executes on.
	pub chain_id: u64,
	/// The router contract.
	pub to: Address,
	/// Route calldata, copied verbatim.
	pub data: Bytes,
	/// Native value, copied verbatim from the route.
	pub value: U256,
	/// The swap owner's address.
	pub from: Address,
	/// Gas price in wei.
	pub gas_price: u128,
	/// Gas limit.
	pub gas_limit: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_transaction_request_conversion() {
		let token = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
		let tx = Transaction {
			chain_id: 1,
			to: Some(token),
			data: vec![0x09, 0x5e, 0xa7, 0xb3],
			value: U256::ZERO,
			gas_limit: Some(100_000),
			gas_price: Some(30_000_000_000),
			nonce: None,
		};

		let request: TransactionRequest = tx.into();
		assert_eq!(request.chain_id, Some(1));
		assert_eq!(request.gas, Some(100_000));
		assert_eq!(request.gas_price, Some(30_000_000_000));
		assert_eq!(request.nonce, None);
		assert_eq!(request.value, Some(U256::ZERO));
	}
}
