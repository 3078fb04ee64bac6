//! HTTP routing service client.
//!
//! Talks to a routing API that wraps a smart-order router: the request
//! carries the trade description plus the signed input-token permit, and
//! the response carries the quote, the router calldata with its attached
//! native value, and a gas price estimate. The client owns the wire
//! format; route semantics (zero-quote rejection) stay in
//! [`RouterService`](crate::RouterService).

use alloy_primitives::{Address, Bytes, PrimitiveSignature as Signature, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swapper_types::{Config, Permit, Route, RouteRequest, TradeKind};

use crate::{RouterError, RouterInterface};

/// Client for an HTTP routing service.
pub struct HttpRouter {
	client: reqwest::Client,
	endpoint: reqwest::Url,
	chain_id: u64,
}

impl HttpRouter {
	/// Creates a client for the configured routing service.
	pub fn new(config: &Config) -> Result<Self, RouterError> {
		let base: reqwest::Url = config
			.routing_url
			.parse()
			.map_err(|e| RouterError::Service(format!("invalid routing URL: {}", e)))?;
		let endpoint = base
			.join("route")
			.map_err(|e| RouterError::Service(format!("invalid routing URL: {}", e)))?;

		Ok(Self {
			client: reqwest::Client::new(),
			endpoint,
			chain_id: config.chain_id,
		})
	}
}

/// Formats basis points as the percent string the service expects,
/// without going through floating point.
fn slippage_percent(bps: u16) -> String {
	format!("{}.{:02}", bps / 100, bps % 100)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PermitWire<'a> {
	#[serde(flatten)]
	permit: &'a Permit,
	signature: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteWireRequest<'a> {
	chain_id: u64,
	token_in: Address,
	token_out: Address,
	/// Fixed-side amount in base units, as a decimal string.
	amount: String,
	#[serde(rename = "type")]
	trade_type: &'static str,
	recipient: Address,
	slippage_tolerance: String,
	deadline: u64,
	permit: PermitWire<'a>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteWireResponse {
	/// Quoted output amount in base units, as a decimal string.
	quote: String,
	method_parameters: MethodParameters,
	/// Gas price estimate in wei, as a decimal string.
	gas_price_wei: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MethodParameters {
	calldata: String,
	/// Native value to attach, hex-encoded.
	value: String,
	/// Router contract the calldata targets.
	to: String,
}

impl RouteWireResponse {
	fn into_route(self) -> Result<Route, RouterError> {
		let quote_out = U256::from_str_radix(&self.quote, 10)
			.map_err(|e| RouterError::InvalidResponse(format!("bad quote: {}", e)))?;
		let calldata: Bytes = self
			.method_parameters
			.calldata
			.parse()
			.map_err(|e| RouterError::InvalidResponse(format!("bad calldata: {}", e)))?;
		let value: U256 = self
			.method_parameters
			.value
			.parse()
			.map_err(|e| RouterError::InvalidResponse(format!("bad value: {}", e)))?;
		let to: Address = self
			.method_parameters
			.to
			.parse()
			.map_err(|e| RouterError::InvalidResponse(format!("bad destination: {}", e)))?;
		let gas_price_wei: u128 = self
			.gas_price_wei
			.parse()
			.map_err(|e| RouterError::InvalidResponse(format!("bad gas price: {}", e)))?;

		Ok(Route {
			quote_out,
			calldata,
			to,
			value,
			gas_price_wei,
		})
	}
}

#[async_trait]
impl RouterInterface for HttpRouter {
	async fn route(
		&self,
		request: &RouteRequest,
		permit: &Permit,
		signature: &Signature,
	) -> Result<Route, RouterError> {
		let body = RouteWireRequest {
			chain_id: self.chain_id,
			token_in: request.token_in.address,
			token_out: request.token_out.address,
			amount: request.amount.to_string(),
			trade_type: match request.kind {
				TradeKind::ExactInput => "exactIn",
				TradeKind::ExactOutput => "exactOut",
			},
			recipient: request.recipient,
			slippage_tolerance: slippage_percent(request.slippage_bps),
			deadline: request.deadline,
			permit: PermitWire {
				permit,
				signature: format!("0x{}", hex::encode(signature.as_bytes())),
			},
		};

		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&body)
			.send()
			.await
			.map_err(|e| RouterError::Service(e.to_string()))?;

		let status = response.status();
		if status == reqwest::StatusCode::NOT_FOUND {
			let text = response.text().await.unwrap_or_default();
			return Err(RouterError::NoRoute(text));
		}
		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			return Err(RouterError::Service(format!(
				"routing service answered {}: {}",
				status, text
			)));
		}

		let wire: RouteWireResponse = response
			.json()
			.await
			.map_err(|e| RouterError::InvalidResponse(e.to_string()))?;
		wire.into_route()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use swapper_types::{PermitDetails, PermitSingle};

	#[test]
	fn test_slippage_percent_formatting() {
		assert_eq!(slippage_percent(50), "0.50");
		assert_eq!(slippage_percent(125), "1.25");
		assert_eq!(slippage_percent(5), "0.05");
		assert_eq!(slippage_percent(0), "0.00");
	}

	#[test]
	fn test_request_wire_shape() {
		let permit = Permit::Allowance(PermitSingle {
			details: PermitDetails {
				token: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
				amount: U256::from(1_000_000u64),
				expiration: 1_900_000_000,
				nonce: 0,
			},
			spender: address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD"),
			sig_deadline: 1_900_000_000,
		});
		let signature = Signature::new(U256::from(1), U256::from(1), false);
		let body = RouteWireRequest {
			chain_id: 1,
			token_in: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
			token_out: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
			amount: "1000000".to_string(),
			trade_type: "exactIn",
			recipient: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
			slippage_tolerance: slippage_percent(50),
			deadline: 1_900_000_000,
			permit: PermitWire {
				permit: &permit,
				signature: format!("0x{}", hex::encode(signature.as_bytes())),
			},
		};

		let json = serde_json::to_value(&body).unwrap();
		assert_eq!(json["chainId"], 1);
		assert_eq!(json["type"], "exactIn");
		assert_eq!(json["amount"], "1000000");
		assert_eq!(json["slippageTolerance"], "0.50");
		// The permit flattens to the Permit2 object shape plus the signature
		assert_eq!(json["permit"]["details"]["nonce"], 0);
		assert_eq!(json["permit"]["sigDeadline"], 1_900_000_000u64);
		assert!(json["permit"]["signature"]
			.as_str()
			.unwrap()
			.starts_with("0x"));
	}

	#[test]
	fn test_response_parsing() {
		let raw = r#"{
			"quote": "492163298607407744",
			"methodParameters": {
				"calldata": "0x3593564c000000000000000000000000",
				"value": "0x00",
				"to": "0x3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD"
			},
			"gasPriceWei": "31000000000"
		}"#;
		let wire: RouteWireResponse = serde_json::from_str(raw).unwrap();
		let route = wire.into_route().unwrap();
		assert_eq!(route.quote_out, U256::from(492_163_298_607_407_744u128));
		assert_eq!(route.value, U256::ZERO);
		assert_eq!(route.gas_price_wei, 31_000_000_000);
		assert_eq!(
			route.to,
			address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD")
		);
		assert_eq!(route.calldata.len(), 16);
	}

	#[test]
	fn test_response_rejects_bad_quote() {
		let raw = r#"{
			"quote": "not-a-number",
			"methodParameters": { "calldata": "0x00", "value": "0x00", "to": "0x3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD" },
			"gasPriceWei": "1"
		}"#;
		let wire: RouteWireResponse = serde_json::from_str(raw).unwrap();
		assert!(matches!(
			wire.into_route(),
			Err(RouterError::InvalidResponse(_))
		));
	}
}
