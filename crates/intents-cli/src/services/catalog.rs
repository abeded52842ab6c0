//! Token catalog over HTTP
//!
//! The directory is assembled from two sources: the settlement service's
//! token list (symbols, decimals, prices) and the bridge's supported-tokens
//! RPC (deposit/withdrawal minimums and fees). Rows are merged by the
//! settlement-layer token id; bridge-only metadata defaults to zero when the
//! bridge omits a token.

use std::collections::HashMap;
use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use intents_types::{format_units, Error, Result, Token};

use super::TokenCatalog;

pub const DEFAULT_SETTLEMENT_URL: &str = "https://1click.chaindefuser.com";
pub const DEFAULT_BRIDGE_RPC_URL: &str = "https://bridge.chaindefuser.com/rpc";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Settlement-side directory row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryToken {
	asset_id: String,
	decimals: u8,
	blockchain: String,
	symbol: String,
	price: Option<f64>,
	contract_address: Option<String>,
}

/// Bridge-side metadata row.
#[derive(Debug, Deserialize)]
struct BridgeToken {
	defuse_asset_identifier: Option<String>,
	near_token_id: String,
	#[serde(default)]
	min_deposit_amount: Option<String>,
	#[serde(default)]
	min_withdrawal_amount: Option<String>,
	#[serde(default)]
	withdrawal_fee: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BridgeTokensResult {
	tokens: Vec<BridgeToken>,
}

#[derive(Debug, Deserialize)]
struct BridgeRpcResponse {
	result: Option<BridgeTokensResult>,
}

pub struct HttpTokenCatalog {
	client: reqwest::Client,
	settlement_url: String,
	bridge_rpc_url: String,
}

impl HttpTokenCatalog {
	pub fn new() -> Result<Self> {
		Self::with_urls(DEFAULT_SETTLEMENT_URL, DEFAULT_BRIDGE_RPC_URL)
	}

	pub fn with_urls(settlement_url: &str, bridge_rpc_url: &str) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(HTTP_TIMEOUT)
			.build()
			.map_err(|e| Error::Api(format!("Failed to build HTTP client: {}", e)))?;
		Ok(Self {
			client,
			settlement_url: settlement_url.trim_end_matches('/').to_string(),
			bridge_rpc_url: bridge_rpc_url.to_string(),
		})
	}

	async fn fetch_directory(&self) -> Result<Vec<DirectoryToken>> {
		let url = format!("{}/v0/tokens", self.settlement_url);
		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| Error::Api(format!("Token directory request failed: {}", e)))?;
		if !response.status().is_success() {
			return Err(Error::Api(format!(
				"Token directory returned {}",
				response.status()
			)));
		}
		response
			.json()
			.await
			.map_err(|e| Error::InvalidApiResponse(format!("Token directory: {}", e)))
	}

	/// Bridge metadata keyed by NEAR token id. A bridge outage degrades to an
	/// empty map rather than failing the whole catalog.
	async fn fetch_bridge_metadata(&self) -> HashMap<String, BridgeToken> {
		let body = json!({
			"jsonrpc": "2.0",
			"id": "dontcare",
			"method": "supported_tokens",
			"params": [{}],
		});
		let response = match self.client.post(&self.bridge_rpc_url).json(&body).send().await {
			Ok(r) => r,
			Err(e) => {
				warn!(error = %e, "Bridge supported_tokens request failed");
				return HashMap::new();
			},
		};
		let parsed: BridgeRpcResponse = match response.json().await {
			Ok(p) => p,
			Err(e) => {
				warn!(error = %e, "Bridge supported_tokens response unreadable");
				return HashMap::new();
			},
		};
		parsed
			.result
			.map(|r| {
				r.tokens
					.into_iter()
					.map(|t| (t.near_token_id.clone(), t))
					.collect()
			})
			.unwrap_or_default()
	}
}

#[async_trait]
impl TokenCatalog for HttpTokenCatalog {
	async fn fetch(&self) -> Result<Vec<Token>> {
		let (directory, bridge) =
			tokio::join!(self.fetch_directory(), self.fetch_bridge_metadata());
		let directory = directory?;
		debug!(
			directory = directory.len(),
			bridge = bridge.len(),
			"Fetched token catalog sources"
		);
		Ok(merge_catalog(directory, &bridge))
	}
}

fn merge_catalog(
	directory: Vec<DirectoryToken>,
	bridge: &HashMap<String, BridgeToken>,
) -> Vec<Token> {
	directory
		.into_iter()
		.map(|row| {
			let near_token_id = near_token_id_of(&row.asset_id);
			let meta = bridge.get(&near_token_id);
			let min_deposit = meta
				.and_then(|m| m.min_deposit_amount.clone())
				.unwrap_or_else(|| "0".to_string());
			let min_withdrawal = meta
				.and_then(|m| m.min_withdrawal_amount.clone())
				.unwrap_or_else(|| "0".to_string());
			let withdrawal_fee = meta
				.and_then(|m| m.withdrawal_fee.clone())
				.unwrap_or_else(|| "0".to_string());
			let asset_identifier = meta
				.and_then(|m| m.defuse_asset_identifier.clone())
				.unwrap_or_else(|| format!("{}:{}", row.blockchain, near_token_id));

			Token {
				symbol: normalize_symbol(&row.symbol, &row.blockchain),
				blockchain: row.blockchain,
				intents_token_id: row.asset_id,
				min_deposit_amount_formatted: format_base_units(&min_deposit, row.decimals),
				min_withdrawal_amount_formatted: format_base_units(&min_withdrawal, row.decimals),
				withdrawal_fee_formatted: format_base_units(&withdrawal_fee, row.decimals),
				near_token_id,
				asset_identifier,
				decimals: row.decimals,
				price_usd: row
					.price
					.map(|p| p.to_string())
					.unwrap_or_else(|| "0".to_string()),
				min_deposit_amount: min_deposit,
				min_withdrawal_amount: min_withdrawal,
				withdrawal_fee,
				contract_address: row.contract_address,
			}
		})
		.collect()
}

/// The settlement layer wraps NEAR; users know the asset as NEAR, not wNEAR.
fn normalize_symbol(symbol: &str, blockchain: &str) -> String {
	if symbol.eq_ignore_ascii_case("wnear") && blockchain.eq_ignore_ascii_case("near") {
		"NEAR".to_string()
	} else {
		symbol.to_string()
	}
}

fn near_token_id_of(asset_id: &str) -> String {
	asset_id
		.strip_prefix("nep141:")
		.unwrap_or(asset_id)
		.to_string()
}

fn format_base_units(raw: &str, decimals: u8) -> String {
	U256::from_str_radix(raw, 10)
		.map(|v| format_units(v, decimals))
		.unwrap_or_else(|_| "0".to_string())
}
