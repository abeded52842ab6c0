//! Settlement API client
//!
//! Talks to three endpoints: the quote service for priced routes, the solver
//! relay for publishing signed intents, and the bridge RPC for deposit
//! addresses. Quote requests carry the optional API key as a bearer token;
//! without one the service applies its default fee tier.
//!
//! Intent signing is ed25519 over the canonical JSON payload, with the
//! signature and public key in their printable `ed25519:` base58 forms.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use ed25519_dalek::Signer;
use rand::RngCore;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use intents_types::{
	DepositAddress, Error, QuoteOutcome, QuoteRequest, QuoteResponse, RecipientKind, Result,
	Settlement, Token,
};

use crate::core::config::WalletConfig;
use crate::core::wallet;

use super::SettlementApi;

pub const DEFAULT_QUOTE_URL: &str = "https://1click.chaindefuser.com";
pub const DEFAULT_RELAY_RPC_URL: &str = "https://solver-relay-v2.chaindefuser.com/rpc";
pub const DEFAULT_BRIDGE_RPC_URL: &str = "https://bridge.chaindefuser.com/rpc";

/// Contract the signed intent payloads are addressed to.
const INTENTS_CONTRACT: &str = "intents.near";

/// Validity window stamped on signed intents.
const INTENT_DEADLINE_SECS: i64 = 180;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteWire {
	amount_in: String,
	amount_out: String,
	deadline: Option<String>,
	deposit_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
	quote: QuoteWire,
	signature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteErrorBody {
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayResult {
	status: String,
	reason: Option<String>,
	intent_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
	result: Option<RelayResult>,
	error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DepositAddressResult {
	address: String,
	chain: String,
	memo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BridgeRpcResponse {
	result: Option<DepositAddressResult>,
	error: Option<serde_json::Value>,
}

/// Single-token transfer intent body.
fn transfer_intent(token_id: &str, amount: &str, receiver_id: &str) -> serde_json::Value {
	let mut tokens = serde_json::Map::new();
	tokens.insert(
		token_id.to_string(),
		serde_json::Value::String(amount.to_string()),
	);
	json!([{
		"intent": "transfer",
		"receiver_id": receiver_id,
		"tokens": tokens,
	}])
}

pub struct HttpSettlementApi {
	client: reqwest::Client,
	quote_url: String,
	relay_rpc_url: String,
	bridge_rpc_url: String,
	api_key: Option<String>,
}

impl HttpSettlementApi {
	pub fn new(api_key: Option<String>) -> Result<Self> {
		Self::with_urls(
			api_key,
			DEFAULT_QUOTE_URL,
			DEFAULT_RELAY_RPC_URL,
			DEFAULT_BRIDGE_RPC_URL,
		)
	}

	pub fn with_urls(
		api_key: Option<String>,
		quote_url: &str,
		relay_rpc_url: &str,
		bridge_rpc_url: &str,
	) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(HTTP_TIMEOUT)
			.build()
			.map_err(|e| Error::Api(format!("Failed to build HTTP client: {}", e)))?;
		Ok(Self {
			client,
			quote_url: quote_url.trim_end_matches('/').to_string(),
			relay_rpc_url: relay_rpc_url.to_string(),
			bridge_rpc_url: bridge_rpc_url.to_string(),
			api_key,
		})
	}

	/// Sign an intent payload and publish it through the solver relay.
	async fn publish_intent(
		&self,
		intents: serde_json::Value,
		wallet: &WalletConfig,
	) -> Result<Settlement> {
		let signing = wallet::signing_key_from_private_key(&wallet.private_key)?;
		let verifying = signing.verifying_key();

		let mut nonce = [0u8; 32];
		rand::thread_rng().fill_bytes(&mut nonce);
		let deadline = (Utc::now() + chrono::Duration::seconds(INTENT_DEADLINE_SECS)).to_rfc3339();

		let payload = json!({
			"signer_id": wallet.wallet_address,
			"verifying_contract": INTENTS_CONTRACT,
			"deadline": deadline,
			"nonce": BASE64.encode(nonce),
			"intents": intents,
		})
		.to_string();

		let signature = signing.sign(payload.as_bytes());
		let body = json!({
			"jsonrpc": "2.0",
			"id": "dontcare",
			"method": "publish_intent",
			"params": [{
				"signed_data": {
					"standard": "raw_ed25519",
					"payload": payload,
					"signature": format!("ed25519:{}", bs58::encode(signature.to_bytes()).into_string()),
					"public_key": format!("ed25519:{}", bs58::encode(verifying.to_bytes()).into_string()),
				},
			}],
		});

		let response = self
			.client
			.post(&self.relay_rpc_url)
			.json(&body)
			.send()
			.await
			.map_err(|e| Error::Api(format!("Intent publish failed: {}", e)))?;
		let parsed: RelayResponse = response
			.json()
			.await
			.map_err(|e| Error::InvalidApiResponse(format!("Relay response: {}", e)))?;

		if let Some(error) = parsed.error {
			return Err(Error::Api(format!("Relay rejected the intent: {}", error)));
		}
		let result = parsed
			.result
			.ok_or_else(|| Error::InvalidApiResponse("Relay response: empty result".to_string()))?;
		if result.status != "OK" {
			return Err(Error::Api(format!(
				"Intent not settled: {}",
				result.reason.unwrap_or(result.status)
			)));
		}
		let tx_hash = result.intent_hash.ok_or_else(|| {
			Error::InvalidApiResponse("Relay response: missing intent hash".to_string())
		})?;
		debug!(tx_hash = %tx_hash, "Intent settled");
		Ok(Settlement { tx_hash })
	}
}

#[async_trait::async_trait]
impl SettlementApi for HttpSettlementApi {
	async fn request_quote(&self, request: &QuoteRequest) -> Result<QuoteOutcome<QuoteResponse>> {
		let recipient_type = match request.recipient_kind {
			RecipientKind::Intents => "INTENTS",
			RecipientKind::DestinationChain => "DESTINATION_CHAIN",
		};
		let body = json!({
			"dry": false,
			"swapType": "EXACT_INPUT",
			"depositType": "INTENTS",
			"refundType": "INTENTS",
			"slippageTolerance": 100,
			"originAsset": request.origin_asset,
			"destinationAsset": request.destination_asset,
			"amount": request.amount,
			"recipient": request.recipient,
			"refundTo": request.refund_to,
			"recipientType": recipient_type,
		});

		let mut builder = self
			.client
			.post(format!("{}/v0/quote", self.quote_url))
			.json(&body);
		if let Some(key) = &self.api_key {
			builder = builder.bearer_auth(key);
		}

		let response = builder
			.send()
			.await
			.map_err(|e| Error::Api(format!("Quote request failed: {}", e)))?;
		let status = response.status();

		if status.is_client_error() {
			// The service declines unroutable requests with a message; that
			// is a quote outcome, not a transport failure.
			let message = response
				.json::<QuoteErrorBody>()
				.await
				.ok()
				.and_then(|b| b.message)
				.unwrap_or_else(|| format!("Quote declined ({})", status));
			return Ok(QuoteOutcome::Error { message });
		}
		if !status.is_success() {
			return Err(Error::Api(format!("Quote service returned {}", status)));
		}

		let envelope: QuoteEnvelope = response
			.json()
			.await
			.map_err(|e| Error::InvalidApiResponse(format!("Quote response: {}", e)))?;
		let quote_id = envelope
			.signature
			.or_else(|| envelope.quote.deposit_address.clone())
			.unwrap_or_else(|| "unsigned".to_string());
		Ok(QuoteOutcome::Success(QuoteResponse {
			quote_id,
			origin_asset: request.origin_asset.clone(),
			amount_in: envelope.quote.amount_in,
			amount_out: envelope.quote.amount_out,
			deadline: envelope.quote.deadline,
			deposit_address: envelope.quote.deposit_address,
		}))
	}

	async fn execute_quote(
		&self,
		quote: &QuoteResponse,
		wallet: &WalletConfig,
	) -> Result<Settlement> {
		let deposit_address = quote.deposit_address.as_deref().ok_or_else(|| {
			Error::InvalidApiResponse("Quote has no deposit address to fund".to_string())
		})?;
		// Funding the deposit address is what commits the quote; the solver
		// handles the rest of the route.
		let intents = transfer_intent(&quote.origin_asset, &quote.amount_in, deposit_address);
		self.publish_intent(intents, wallet).await
	}

	async fn transfer(
		&self,
		token_id: &str,
		amount: &str,
		to_address: &str,
		wallet: &WalletConfig,
	) -> Result<Settlement> {
		let intents = transfer_intent(token_id, amount, to_address);
		self.publish_intent(intents, wallet).await
	}

	async fn deposit_address(
		&self,
		wallet_address: &str,
		token: &Token,
	) -> Result<DepositAddress> {
		let body = json!({
			"jsonrpc": "2.0",
			"id": "dontcare",
			"method": "deposit_address",
			"params": [{
				"chain": token.asset_identifier,
				"account_id": wallet_address,
			}],
		});
		let response = self
			.client
			.post(&self.bridge_rpc_url)
			.json(&body)
			.send()
			.await
			.map_err(|e| Error::Api(format!("Deposit address request failed: {}", e)))?;
		let parsed: BridgeRpcResponse = response
			.json()
			.await
			.map_err(|e| Error::InvalidApiResponse(format!("Deposit address: {}", e)))?;

		if let Some(error) = parsed.error {
			return Err(Error::Api(format!("Deposit address rejected: {}", error)));
		}
		let result = parsed.result.ok_or_else(|| {
			Error::InvalidApiResponse("Deposit address: empty result".to_string())
		})?;
		Ok(DepositAddress {
			address: result.address,
			chain: result.chain,
			memo: result.memo,
		})
	}
}
