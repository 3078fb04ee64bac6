//! Alloy-based EVM chain access implementation.
//!
//! Uses the Alloy provider stack to read allowances and Permit2 nonces
//! via `eth_call`, submit the approval transaction through a
//! wallet-filled provider, and poll for confirmations. Call data for the
//! two read-only views is ABI-encoded by hand; both are single static
//! calls and do not warrant contract bindings.

use alloy_network::EthereumWallet;
use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport_http::Http;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use swapper_types::{Config, Transaction, TransactionHash, TransactionReceipt};

use crate::{ChainError, ChainInterface};

/// ERC-20 `allowance(address,address)` selector.
const ERC20_ALLOWANCE_SELECTOR: [u8; 4] = [0xdd, 0x62, 0xed, 0x3e];
/// Permit2 `allowance(address,address,address)` selector.
const PERMIT2_ALLOWANCE_SELECTOR: [u8; 4] = [0x92, 0x7d, 0xa1, 0x05];

/// Encodes the ERC-20 allowance view call for an (owner, spender) pair.
fn encode_erc20_allowance_call(owner: Address, spender: Address) -> Vec<u8> {
	let mut call_data = Vec::with_capacity(4 + 64);
	call_data.extend_from_slice(&ERC20_ALLOWANCE_SELECTOR);
	call_data.extend_from_slice(&[0; 12]);
	call_data.extend_from_slice(owner.as_slice());
	call_data.extend_from_slice(&[0; 12]);
	call_data.extend_from_slice(spender.as_slice());
	call_data
}

/// Encodes the Permit2 allowance view call; Permit2 keys its packed
/// allowance state by (owner, token, spender).
fn encode_permit2_allowance_call(owner: Address, token: Address, spender: Address) -> Vec<u8> {
	let mut call_data = Vec::with_capacity(4 + 96);
	call_data.extend_from_slice(&PERMIT2_ALLOWANCE_SELECTOR);
	for address in [owner, token, spender] {
		call_data.extend_from_slice(&[0; 12]);
		call_data.extend_from_slice(address.as_slice());
	}
	call_data
}

/// Decodes the nonce from a Permit2 allowance response:
/// (uint160 amount, uint48 expiration, uint48 nonce) as three words.
fn decode_permit2_nonce(response: &[u8]) -> Result<u64, ChainError> {
	if response.len() < 96 {
		return Err(ChainError::InvalidResponse(format!(
			"Permit2 allowance response too short: {} bytes",
			response.len()
		)));
	}
	// The nonce word is a uint48; anything above its low six bytes set
	// means we are not looking at a Permit2 allowance response.
	if response[64..90].iter().any(|&b| b != 0) {
		return Err(ChainError::InvalidResponse(
			"permit nonce exceeds uint48".into(),
		));
	}
	let mut bytes = [0u8; 8];
	bytes[2..].copy_from_slice(&response[90..96]);
	Ok(u64::from_be_bytes(bytes))
}

/// Alloy-based chain access.
///
/// Holds one wallet-filled provider for the configured chain; the wallet
/// signs the approval transaction on submission.
pub struct AlloyChain {
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
	poll_interval: Duration,
}

impl AlloyChain {
	/// Connects a provider to the configured RPC endpoint, wiring the
	/// wallet key in for transaction signing.
	pub fn connect(config: &Config) -> Result<Self, ChainError> {
		let url = config
			.rpc_url
			.parse()
			.map_err(|e| ChainError::Network(format!("invalid RPC URL: {}", e)))?;

		let signer: PrivateKeySigner = config.private_key.with_exposed(|key| {
			key.parse()
				.map_err(|_| ChainError::Network("invalid private key format".to_string()))
		})?;
		let chain_signer = signer.with_chain_id(Some(config.chain_id));
		let wallet = EthereumWallet::from(chain_signer);

		let provider = ProviderBuilder::new()
			.with_recommended_fillers()
			.wallet(wallet)
			.on_http(url);

		Ok(Self {
			provider: Arc::new(provider),
			poll_interval: Duration::from_secs(7),
		})
	}

	async fn call(&self, to: Address, call_data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
		let request = TransactionRequest::default().to(to).input(call_data.into());
		let result = self
			.provider
			.call(&request)
			.await
			.map_err(|e| ChainError::Network(format!("eth_call failed: {}", e)))?;
		Ok(result.to_vec())
	}
}

#[async_trait]
impl ChainInterface for AlloyChain {
	async fn erc20_allowance(
		&self,
		token: Address,
		owner: Address,
		spender: Address,
	) -> Result<U256, ChainError> {
		let result = self
			.call(token, encode_erc20_allowance_call(owner, spender))
			.await?;
		if result.len() < 32 {
			return Err(ChainError::InvalidResponse(
				"allowance response shorter than one word".into(),
			));
		}
		Ok(U256::from_be_slice(&result[..32]))
	}

	async fn permit_nonce(
		&self,
		owner: Address,
		token: Address,
		spender: Address,
	) -> Result<u64, ChainError> {
		let permit2 = swapper_types::utils::PERMIT2_ADDRESS;
		let result = self
			.call(
				permit2,
				encode_permit2_allowance_call(owner, token, spender),
			)
			.await?;
		decode_permit2_nonce(&result)
	}

	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, ChainError> {
		let request: TransactionRequest = tx.into();

		// The provider's wallet handles signing
		let pending_tx = self
			.provider
			.send_transaction(request)
			.await
			.map_err(|e| ChainError::TransactionFailed(format!("failed to send: {}", e)))?;

		let tx_hash = *pending_tx.tx_hash();
		let hash = TransactionHash(tx_hash);
		tracing::info!(tx_hash = %hash, "submitted transaction");

		Ok(hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, ChainError> {
		let tx_hash = hash.0;
		let start = tokio::time::Instant::now();

		tracing::debug!(
			tx_hash = %hash,
			confirmations,
			timeout_secs = timeout.as_secs(),
			"waiting for confirmation"
		);

		loop {
			if start.elapsed() > timeout {
				return Err(ChainError::ConfirmationTimeout(timeout, *hash));
			}

			let receipt = match self.provider.get_transaction_receipt(tx_hash).await {
				Ok(Some(receipt)) => receipt,
				Ok(None) => {
					// Not yet mined
					tokio::time::sleep(self.poll_interval).await;
					continue;
				}
				Err(e) => {
					return Err(ChainError::Network(format!("failed to get receipt: {}", e)));
				}
			};

			let current_block = self
				.provider
				.get_block_number()
				.await
				.map_err(|e| ChainError::Network(format!("failed to get block number: {}", e)))?;

			let tx_block = receipt.block_number.unwrap_or(0);
			if current_block.saturating_sub(tx_block) >= confirmations {
				return Ok(TransactionReceipt {
					hash: TransactionHash(receipt.transaction_hash),
					block_number: tx_block,
					success: receipt.status(),
				});
			}

			tokio::time::sleep(self.poll_interval).await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
	const TOKEN: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
	const SPENDER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");

	#[test]
	fn test_erc20_allowance_call_layout() {
		let call_data = encode_erc20_allowance_call(OWNER, SPENDER);
		assert_eq!(call_data.len(), 4 + 64);
		assert_eq!(&call_data[..4], &ERC20_ALLOWANCE_SELECTOR);
		assert_eq!(&call_data[4..16], &[0u8; 12]);
		assert_eq!(&call_data[16..36], OWNER.as_slice());
		assert_eq!(&call_data[48..68], SPENDER.as_slice());
	}

	#[test]
	fn test_permit2_allowance_call_layout() {
		let call_data = encode_permit2_allowance_call(OWNER, TOKEN, SPENDER);
		assert_eq!(call_data.len(), 4 + 96);
		assert_eq!(&call_data[..4], &PERMIT2_ALLOWANCE_SELECTOR);
		assert_eq!(&call_data[16..36], OWNER.as_slice());
		assert_eq!(&call_data[48..68], TOKEN.as_slice());
		assert_eq!(&call_data[80..100], SPENDER.as_slice());
	}

	#[test]
	fn test_decode_permit2_nonce() {
		let mut response = vec![0u8; 96];
		// amount and expiration words are ignored; nonce sits in word three
		response[95] = 5;
		assert_eq!(decode_permit2_nonce(&response).unwrap(), 5);

		response[88] = 1; // 2^56, outside uint48 range
		assert!(matches!(
			decode_permit2_nonce(&response),
			Err(ChainError::InvalidResponse(_))
		));
	}

	#[test]
	fn test_decode_permit2_nonce_rejects_short_response() {
		assert!(matches!(
			decode_permit2_nonce(&[0u8; 64]),
			Err(ChainError::InvalidResponse(_))
		));
	}
}
