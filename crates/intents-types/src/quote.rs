//! Quote and execution wire types
//!
//! A quote is an opaque, time-bounded offer from the settlement collaborator.
//! It is single-use and valid only until its deadline; when the deadline is
//! missing or unparsable we fall back to a 20 minute window from request
//! time rather than treating the quote as already expired or as valid
//! forever.
//!
//! Quote-stage and execute-stage failures are carried as typed outcome
//! values, not errors: a declined quote (no route, amount too small) is an
//! expected result the caller must branch on.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fallback validity window applied when a quote's deadline is unparsable.
pub const QUOTE_FALLBACK_EXPIRY_MINUTES: i64 = 20;

/// Where the settlement layer should deliver the output amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientKind {
	/// Credit the recipient's settlement-layer account.
	Intents,
	/// Pay out on the destination chain (withdrawals).
	DestinationChain,
}

/// Quote request sent to the settlement collaborator. Amounts are base units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	pub origin_asset: String,
	pub destination_asset: String,
	/// Base units, string-encoded integer.
	pub amount: String,
	pub recipient: String,
	pub refund_to: String,
	pub recipient_kind: RecipientKind,
}

/// Quote returned by the settlement collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
	pub quote_id: String,
	/// Settlement-layer id of the asset being spent; the execute step funds
	/// the deposit address in this asset.
	pub origin_asset: String,
	/// Base units actually consumed on the origin side.
	pub amount_in: String,
	/// Base units delivered on the destination side.
	pub amount_out: String,
	/// RFC 3339 timestamp; may be absent or unparsable.
	pub deadline: Option<String>,
	/// Address the signed funds must land at for the solver to act.
	pub deposit_address: Option<String>,
}

/// Compute when a quote stops being valid.
///
/// Unparsable or missing deadlines get the fallback window from `now`.
pub fn quote_expires_at(deadline: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
	deadline
		.and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
		.map(|parsed| parsed.with_timezone(&Utc))
		.unwrap_or_else(|| now + Duration::minutes(QUOTE_FALLBACK_EXPIRY_MINUTES))
}

/// Fully computed swap quote, ready for display and (single) submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
	pub quote: QuoteResponse,
	pub from_token_id: String,
	pub to_token_id: String,
	pub amount_in: String,
	pub amount_in_formatted: String,
	pub amount_out: String,
	pub amount_out_formatted: String,
	/// amount_out / amount_in, rounded to 6 decimal places.
	pub exchange_rate: String,
	pub expires_at: DateTime<Utc>,
}

/// Fully computed withdrawal quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawQuote {
	pub quote: QuoteResponse,
	pub asset_id: String,
	pub amount: String,
	pub amount_formatted: String,
	pub destination_address: String,
	pub received_amount: String,
	pub received_amount_formatted: String,
	pub transfer_fee: String,
	pub transfer_fee_formatted: String,
	pub expires_at: DateTime<Utc>,
}

/// Internal transfer parameters after the balance pre-check. No external
/// quote is involved; the settlement layer moves funds between accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferQuote {
	pub token_id: String,
	/// Base units, string-encoded integer.
	pub amount: String,
	pub amount_formatted: String,
	pub to_address: String,
}

/// Settlement confirmation for a submitted intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
	pub tx_hash: String,
}

/// Deposit address issued by the bridge collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddress {
	pub address: String,
	pub chain: String,
	pub memo: Option<String>,
}

/// Quote-stage result. A declined quote carries the collaborator's message
/// so the caller can show it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QuoteOutcome<T> {
	Success(T),
	Error { message: String },
}

impl<T> QuoteOutcome<T> {
	pub fn is_success(&self) -> bool {
		matches!(self, QuoteOutcome::Success(_))
	}
}

/// Normalized result of an execute/settle request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ExecuteOutcome {
	Success {
		tx_hash: String,
		explorer_link: String,
	},
	Error {
		message: String,
	},
}
