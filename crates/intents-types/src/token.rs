//! Token catalog records and balance snapshots
//!
//! A `Token` is one row of the supported-token catalog, carrying the
//! cross-chain identifiers and the formatted deposit/withdrawal limits.
//! `(symbol, blockchain)` pairs are not guaranteed unique across a catalog
//! load; `intents_token_id` is unique and is the only safe join key when
//! correlating balances and quotes.

use serde::{Deserialize, Serialize};

/// One supported token as reported by the catalog collaborator.
///
/// Immutable per fetch: the catalog is re-fetched on each resolution call and
/// consumers treat the record as read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	pub symbol: String,
	pub blockchain: String,
	/// Cross-chain canonical id; unique within one catalog load.
	pub intents_token_id: String,
	/// Settlement-layer contract id for the wrapped representation.
	pub near_token_id: String,
	/// Raw asset identifier used by the bridge collaborator.
	pub asset_identifier: String,
	pub decimals: u8,
	#[serde(rename = "priceUSD")]
	pub price_usd: String,
	pub min_deposit_amount: String,
	pub min_deposit_amount_formatted: String,
	pub min_withdrawal_amount: String,
	pub min_withdrawal_amount_formatted: String,
	pub withdrawal_fee: String,
	pub withdrawal_fee_formatted: String,
	pub contract_address: Option<String>,
}

/// A token extended with the wallet's settlement-layer holdings.
///
/// The balance is a snapshot taken at fetch time, in base units encoded as a
/// decimal string. Only non-zero holdings are retained by the oracle. The
/// snapshot can be stale by the time an execute call lands; eligibility
/// checks built on it are advisory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
	#[serde(flatten)]
	pub token: Token,
	/// Base units, string-encoded integer.
	pub balance: String,
	pub balance_formatted: String,
}
