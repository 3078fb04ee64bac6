//! Route resolution request and response types.
//!
//! A [`RouteRequest`] describes one swap attempt to the external routing
//! service; a [`Route`] is the execution plan it answers with. Routes are
//! produced fresh per attempt and never cached or reused, since nonce,
//! deadline and allowance state may have moved underneath them.

use alloy_primitives::{Address, Bytes, U256};

use crate::tokens::Token;

/// Which side of the trade is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeKind {
	/// The input amount is exact; the output is quoted.
	ExactInput,
	/// The output amount is exact; the input is quoted.
	ExactOutput,
}

/// One swap attempt as presented to the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
	/// Token being sold.
	pub token_in: Token,
	/// Token being bought.
	pub token_out: Token,
	/// Amount in `token_in` base units. Must be bit-for-bit the amount
	/// embedded in the signed permit accompanying the request.
	pub amount: U256,
	/// Trade direction.
	pub kind: TradeKind,
	/// Recipient of the swap output.
	pub recipient: Address,
	/// Slippage tolerance in basis points applied by the routing service.
	pub slippage_bps: u16,
	/// UNIX deadline for executing the swap.
	pub deadline: u64,
}

/// Execution plan returned by the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
	/// Quoted output amount in `token_out` base units.
	pub quote_out: U256,
	/// Opaque execution calldata for the router contract.
	pub calldata: Bytes,
	/// The router contract the calldata must be sent to.
	pub to: Address,
	/// Native value to attach to the transaction.
	pub value: U256,
	/// Gas price estimate in wei.
	pub gas_price_wei: u128,
}
