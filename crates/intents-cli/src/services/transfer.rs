//! Internal transfer orchestration
//!
//! Transfers move funds between settlement-layer accounts directly; there is
//! no quote, no fee, and nothing leaves the settlement layer. Preparation is
//! the local validation half, execution publishes the signed intent.

use intents_types::{
	format_units, parse_units, ExecuteOutcome, Result, Token, TokenBalance, TransferQuote,
};

use crate::core::config::WalletConfig;

use super::{ensure_balance, explorer_link, SettlementApi};

pub struct TransferParams {
	pub token: Token,
	/// Human units.
	pub amount: String,
	pub to_address: String,
}

/// Validate a transfer locally. No network calls are made.
pub fn prepare_transfer(
	balances: &[TokenBalance],
	params: &TransferParams,
) -> Result<TransferQuote> {
	let amount_base = parse_units(&params.amount, params.token.decimals)?;
	ensure_balance(balances, &params.token, amount_base)?;
	Ok(TransferQuote {
		token_id: params.token.intents_token_id.clone(),
		amount: amount_base.to_string(),
		amount_formatted: format_units(amount_base, params.token.decimals),
		to_address: params.to_address.clone(),
	})
}

pub async fn execute_transfer(
	settlement: &dyn SettlementApi,
	quote: &TransferQuote,
	wallet: &WalletConfig,
) -> ExecuteOutcome {
	match settlement
		.transfer(&quote.token_id, &quote.amount, &quote.to_address, wallet)
		.await
	{
		Ok(settled) => ExecuteOutcome::Success {
			explorer_link: explorer_link(&settled.tx_hash),
			tx_hash: settled.tx_hash,
		},
		Err(e) => ExecuteOutcome::Error {
			message: e.to_string(),
		},
	}
}
