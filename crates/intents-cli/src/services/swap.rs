//! Swap orchestration
//!
//! Quote and execute are separate steps with a user decision between them.
//! The quote step validates the amount and the wallet's balance locally
//! before any network call; only a request that could actually be funded is
//! sent to the settlement collaborator.

use chrono::Utc;
use tracing::debug;

use intents_types::{
	parse_units, quote_expires_at, ExecuteOutcome, QuoteOutcome, QuoteRequest, RecipientKind,
	Result, SwapQuote, Token, TokenBalance,
};

use crate::core::config::WalletConfig;

use super::{ensure_balance, explorer_link, format_base_units, SettlementApi};

pub struct SwapParams {
	pub from: Token,
	pub to: Token,
	/// Human units, e.g. "2.5".
	pub amount: String,
}

/// Price a swap. Local failures (bad amount, insufficient balance) are
/// errors raised before quoting; a declined quote is a typed outcome.
pub async fn get_swap_quote(
	settlement: &dyn SettlementApi,
	balances: &[TokenBalance],
	wallet: &WalletConfig,
	params: &SwapParams,
) -> Result<QuoteOutcome<SwapQuote>> {
	let amount_base = parse_units(&params.amount, params.from.decimals)?;
	ensure_balance(balances, &params.from, amount_base)?;

	let request = QuoteRequest {
		origin_asset: params.from.intents_token_id.clone(),
		destination_asset: params.to.intents_token_id.clone(),
		amount: amount_base.to_string(),
		recipient: wallet.wallet_address.clone(),
		refund_to: wallet.wallet_address.clone(),
		recipient_kind: RecipientKind::Intents,
	};
	debug!(
		from = %params.from.symbol,
		to = %params.to.symbol,
		amount = %request.amount,
		"Requesting swap quote"
	);

	match settlement.request_quote(&request).await? {
		QuoteOutcome::Error { message } => Ok(QuoteOutcome::Error { message }),
		QuoteOutcome::Success(quote) => {
			let amount_in_formatted = format_base_units(&quote.amount_in, params.from.decimals);
			let amount_out_formatted = format_base_units(&quote.amount_out, params.to.decimals);
			let exchange_rate = exchange_rate(&amount_in_formatted, &amount_out_formatted);
			let expires_at = quote_expires_at(quote.deadline.as_deref(), Utc::now());
			Ok(QuoteOutcome::Success(SwapQuote {
				amount_in: quote.amount_in.clone(),
				amount_out: quote.amount_out.clone(),
				quote,
				from_token_id: params.from.intents_token_id.clone(),
				to_token_id: params.to.intents_token_id.clone(),
				amount_in_formatted,
				amount_out_formatted,
				exchange_rate,
				expires_at,
			}))
		},
	}
}

/// Submit the funding intent for a previously obtained quote. Failures are
/// outcome values so callers in a session loop can display and continue.
pub async fn execute_swap(
	settlement: &dyn SettlementApi,
	quote: &SwapQuote,
	wallet: &WalletConfig,
) -> ExecuteOutcome {
	match settlement.execute_quote(&quote.quote, wallet).await {
		Ok(settled) => ExecuteOutcome::Success {
			explorer_link: explorer_link(&settled.tx_hash),
			tx_hash: settled.tx_hash,
		},
		Err(e) => ExecuteOutcome::Error {
			message: e.to_string(),
		},
	}
}

/// Output per unit of input, display precision of 6. Rates are informational
/// only; settlement amounts stay in base units.
fn exchange_rate(amount_in_formatted: &str, amount_out_formatted: &str) -> String {
	let amount_in: f64 = amount_in_formatted.parse().unwrap_or(0.0);
	let amount_out: f64 = amount_out_formatted.parse().unwrap_or(0.0);
	if amount_in <= 0.0 {
		return "0".to_string();
	}
	format!("{:.6}", amount_out / amount_in)
}
