//! Balance oracle over NEAR RPC
//!
//! Settlement-layer balances live in the multi-token contract, queried via a
//! `mt_batch_balance_of` view call. Token ids are batched to keep each view
//! call within gas limits, and any failure degrades to "no balances" so a
//! flaky RPC node never blocks a command that only wanted a pre-check.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use intents_types::{format_units, Error, Result, Token, TokenBalance};

use super::{BalanceOracle, TokenCatalog};

pub const DEFAULT_NEAR_RPC_URL: &str = "https://rpc.mainnet.near.org";

/// Multi-token contract holding settlement-layer balances.
const INTENTS_CONTRACT: &str = "intents.near";

/// Token ids per view call.
const BATCH_SIZE: usize = 100;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct CallFunctionResult {
	result: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
	result: Option<CallFunctionResult>,
	error: Option<serde_json::Value>,
}

pub struct HttpBalanceOracle {
	client: reqwest::Client,
	rpc_url: String,
	catalog: Arc<dyn TokenCatalog>,
}

impl HttpBalanceOracle {
	pub fn new(catalog: Arc<dyn TokenCatalog>) -> Result<Self> {
		Self::with_url(catalog, DEFAULT_NEAR_RPC_URL)
	}

	pub fn with_url(catalog: Arc<dyn TokenCatalog>, rpc_url: &str) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(HTTP_TIMEOUT)
			.build()
			.map_err(|e| Error::Api(format!("Failed to build HTTP client: {}", e)))?;
		Ok(Self {
			client,
			rpc_url: rpc_url.to_string(),
			catalog,
		})
	}

	/// One `mt_batch_balance_of` view call, returning base-unit balances in
	/// token-id order.
	async fn batch_balances(&self, wallet_address: &str, token_ids: &[&str]) -> Result<Vec<String>> {
		let args = json!({
			"account_id": wallet_address,
			"token_ids": token_ids,
		});
		let body = json!({
			"jsonrpc": "2.0",
			"id": "dontcare",
			"method": "query",
			"params": {
				"request_type": "call_function",
				"finality": "final",
				"account_id": INTENTS_CONTRACT,
				"method_name": "mt_batch_balance_of",
				"args_base64": BASE64.encode(args.to_string()),
			},
		});

		let response = self
			.client
			.post(&self.rpc_url)
			.json(&body)
			.send()
			.await
			.map_err(|e| Error::Api(format!("Balance query failed: {}", e)))?;
		let parsed: RpcResponse = response
			.json()
			.await
			.map_err(|e| Error::InvalidApiResponse(format!("Balance query: {}", e)))?;

		if let Some(error) = parsed.error {
			return Err(Error::Api(format!("Balance query rejected: {}", error)));
		}
		let bytes = parsed
			.result
			.ok_or_else(|| Error::InvalidApiResponse("Balance query: empty result".to_string()))?
			.result;
		serde_json::from_slice(&bytes)
			.map_err(|e| Error::InvalidApiResponse(format!("Balance payload: {}", e)))
	}

	async fn fetch_all(&self, wallet_address: &str) -> Result<Vec<TokenBalance>> {
		let tokens = self.catalog.fetch().await?;
		let mut balances = Vec::new();

		for chunk in tokens.chunks(BATCH_SIZE) {
			let ids: Vec<&str> = chunk.iter().map(|t| t.intents_token_id.as_str()).collect();
			let amounts = self.batch_balances(wallet_address, &ids).await?;
			for (token, raw) in chunk.iter().zip(amounts) {
				if let Some(balance) = non_zero_balance(token, &raw) {
					balances.push(balance);
				}
			}
		}

		debug!(
			wallet = wallet_address,
			held = balances.len(),
			"Fetched settlement balances"
		);
		Ok(balances)
	}
}

fn non_zero_balance(token: &Token, raw: &str) -> Option<TokenBalance> {
	let value = U256::from_str_radix(raw, 10).ok()?;
	if value.is_zero() {
		return None;
	}
	Some(TokenBalance {
		token: token.clone(),
		balance: raw.to_string(),
		balance_formatted: format_units(value, token.decimals),
	})
}

#[async_trait]
impl BalanceOracle for HttpBalanceOracle {
	async fn fetch(&self, wallet_address: &str) -> Vec<TokenBalance> {
		match self.fetch_all(wallet_address).await {
			Ok(balances) => balances,
			Err(e) => {
				warn!(error = %e, "Balance fetch failed, treating as empty");
				Vec::new()
			},
		}
	}
}
