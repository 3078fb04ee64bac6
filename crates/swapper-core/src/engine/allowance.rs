//! Allowance gate: the only on-chain write in the pipeline.
//!
//! Before a permit can authorize anything, the Permit2 contract itself
//! needs a plain ERC-20 allowance over the owner's source token. The
//! gate reads the current allowance and, only when it is zero or below
//! the required amount, submits one approval for the maximal sentinel
//! value — amortizing all future swaps of this token — and blocks until
//! it confirms. The raised allowance is then re-read, never assumed.
//!
//! With a sufficient allowance already in place the gate is a single
//! read and zero writes, so calling it repeatedly is harmless.

use alloy_primitives::{Address, U256};
use std::time::Duration;
use swapper_chain::ChainService;
use swapper_types::{Config, Token, Transaction};

use crate::SwapError;

/// ERC-20 `approve(address,uint256)` selector.
const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// Maximal approval sentinel.
pub const MAX_ALLOWANCE: U256 = U256::MAX;

/// Ensures the permit contract holds a sufficient source-token allowance.
pub struct AllowanceGate<'a> {
	config: &'a Config,
	chain: &'a ChainService,
}

impl<'a> AllowanceGate<'a> {
	pub fn new(config: &'a Config, chain: &'a ChainService) -> Self {
		Self { config, chain }
	}

	/// Returns the effective allowance, raising it first if it is zero
	/// or below `required`.
	///
	/// A reverted or timed-out approval is fatal for the attempt; no
	/// later stage may run after it.
	pub async fn ensure(&self, token: &Token, required: U256) -> Result<U256, SwapError> {
		let owner = self.config.wallet_address;
		let spender = self.config.permit2_address;

		let current = self
			.chain
			.erc20_allowance(token.address, owner, spender)
			.await?;
		if !current.is_zero() && current >= required {
			tracing::debug!(token = %token.symbol, allowance = %current, "allowance sufficient");
			return Ok(current);
		}

		tracing::info!(
			token = %token.symbol,
			current = %current,
			required = %required,
			"raising allowance for permit contract"
		);

		let tx = approve_transaction(self.config.chain_id, token.address, spender, MAX_ALLOWANCE);
		let tx_hash = self
			.chain
			.submit(tx)
			.await
			.map_err(|e| SwapError::ApprovalFailed {
				tx_hash: None,
				reason: e.to_string(),
			})?;

		let receipt = self
			.chain
			.wait_for_confirmation(
				&tx_hash,
				self.config.approval_confirmations,
				Duration::from_secs(self.config.approval_timeout_secs),
			)
			.await
			.map_err(|e| SwapError::ApprovalFailed {
				tx_hash: Some(tx_hash),
				reason: e.to_string(),
			})?;

		if !receipt.success {
			return Err(SwapError::ApprovalFailed {
				tx_hash: Some(receipt.hash),
				reason: format!("approval reverted in block {}", receipt.block_number),
			});
		}
		tracing::info!(tx_hash = %tx_hash, "approval confirmed");

		// Re-read rather than trusting the sentinel we asked for;
		// non-standard tokens may clamp it.
		let raised = self
			.chain
			.erc20_allowance(token.address, owner, spender)
			.await?;
		if raised < required {
			return Err(SwapError::ApprovalFailed {
				tx_hash: Some(tx_hash),
				reason: format!(
					"allowance {} still below required {} after approval",
					raised, required
				),
			});
		}
		Ok(raised)
	}
}

/// Builds the ERC-20 approval transaction raising `spender`'s allowance
/// over `token` to `amount`.
fn approve_transaction(
	chain_id: u64,
	token: Address,
	spender: Address,
	amount: U256,
) -> Transaction {
	let mut call_data = Vec::with_capacity(4 + 64);
	call_data.extend_from_slice(&APPROVE_SELECTOR);
	call_data.extend_from_slice(&[0; 12]);
	call_data.extend_from_slice(spender.as_slice());
	call_data.extend_from_slice(&amount.to_be_bytes::<32>());

	Transaction {
		chain_id,
		to: Some(token),
		data: call_data,
		value: U256::ZERO,
		gas_limit: Some(100_000),
		gas_price: None,
		nonce: None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_approve_transaction_layout() {
		let token = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
		let spender = swapper_types::utils::PERMIT2_ADDRESS;
		let tx = approve_transaction(1, token, spender, MAX_ALLOWANCE);

		assert_eq!(tx.to, Some(token));
		assert_eq!(tx.value, U256::ZERO);
		assert_eq!(tx.data.len(), 4 + 64);
		assert_eq!(&tx.data[..4], &APPROVE_SELECTOR);
		assert_eq!(&tx.data[4..16], &[0u8; 12]);
		assert_eq!(&tx.data[16..36], spender.as_slice());
		// U256::MAX encodes as 32 bytes of 0xff
		assert!(tx.data[36..68].iter().all(|&b| b == 0xff));
	}
}
