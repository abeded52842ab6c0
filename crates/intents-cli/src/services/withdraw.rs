//! Withdrawal orchestration
//!
//! A withdrawal is a same-asset quote delivered on the destination chain.
//! The bridge fee is not a separate field on the wire; it is the difference
//! between what the quote consumes and what arrives, computed here so the
//! confirmation screen can show it.

use alloy_primitives::U256;
use chrono::Utc;
use tracing::debug;

use intents_types::{
	parse_units, quote_expires_at, Error, ExecuteOutcome, QuoteOutcome, QuoteRequest,
	RecipientKind, Result, Token, TokenBalance, WithdrawQuote,
};

use crate::core::config::WalletConfig;

use super::{ensure_balance, explorer_link, format_base_units, SettlementApi};

pub struct WithdrawParams {
	pub token: Token,
	/// Human units.
	pub amount: String,
	pub to_address: String,
}

/// Price a withdrawal to an external chain address.
pub async fn get_withdraw_quote(
	settlement: &dyn SettlementApi,
	balances: &[TokenBalance],
	wallet: &WalletConfig,
	params: &WithdrawParams,
) -> Result<QuoteOutcome<WithdrawQuote>> {
	let token = &params.token;
	let amount_base = parse_units(&params.amount, token.decimals)?;

	let minimum = U256::from_str_radix(&token.min_withdrawal_amount, 10).unwrap_or(U256::ZERO);
	if amount_base < minimum {
		return Err(Error::Validation(format!(
			"Amount below minimum withdrawal: {} {}",
			token.min_withdrawal_amount_formatted, token.symbol
		)));
	}
	ensure_balance(balances, token, amount_base)?;

	let request = QuoteRequest {
		origin_asset: token.intents_token_id.clone(),
		destination_asset: token.intents_token_id.clone(),
		amount: amount_base.to_string(),
		recipient: params.to_address.clone(),
		refund_to: wallet.wallet_address.clone(),
		recipient_kind: RecipientKind::DestinationChain,
	};
	debug!(
		token = %token.symbol,
		amount = %request.amount,
		to = %params.to_address,
		"Requesting withdrawal quote"
	);

	match settlement.request_quote(&request).await? {
		QuoteOutcome::Error { message } => Ok(QuoteOutcome::Error { message }),
		QuoteOutcome::Success(quote) => {
			let fee = transfer_fee(&quote.amount_in, &quote.amount_out);
			let expires_at = quote_expires_at(quote.deadline.as_deref(), Utc::now());
			Ok(QuoteOutcome::Success(WithdrawQuote {
				asset_id: token.intents_token_id.clone(),
				amount: quote.amount_in.clone(),
				amount_formatted: format_base_units(&quote.amount_in, token.decimals),
				destination_address: params.to_address.clone(),
				received_amount: quote.amount_out.clone(),
				received_amount_formatted: format_base_units(&quote.amount_out, token.decimals),
				transfer_fee_formatted: format_base_units(&fee, token.decimals),
				transfer_fee: fee,
				quote,
				expires_at,
			}))
		},
	}
}

pub async fn execute_withdraw(
	settlement: &dyn SettlementApi,
	quote: &WithdrawQuote,
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

/// Consumed minus delivered. A quote that delivers more than it consumes is
/// treated as fee-free rather than underflowing.
fn transfer_fee(amount_in: &str, amount_out: &str) -> String {
	let amount_in = U256::from_str_radix(amount_in, 10).unwrap_or(U256::ZERO);
	let amount_out = U256::from_str_radix(amount_out, 10).unwrap_or(U256::ZERO);
	amount_in.saturating_sub(amount_out).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::services::test_support::*;
	use std::sync::atomic::Ordering;

	fn params(amount: &str) -> WithdrawParams {
		WithdrawParams {
			token: token("USDC", "eth", 6),
			amount: amount.to_string(),
			to_address: "0xrecipient".to_string(),
		}
	}

	#[tokio::test]
	async fn fee_is_consumed_minus_delivered() {
		let settlement = FakeSettlement::with_quote(QuoteOutcome::Success(quote_response(
			"2500000", "2300000",
		)));
		let balances = vec![balance(token("USDC", "eth", 6), "10000000")];

		let outcome = get_withdraw_quote(&settlement, &balances, &wallet(), &params("2.5"))
			.await
			.unwrap();
		let quote = match outcome {
			QuoteOutcome::Success(q) => q,
			QuoteOutcome::Error { message } => panic!("declined: {}", message),
		};
		assert_eq!(quote.transfer_fee, "200000");
		assert_eq!(quote.transfer_fee_formatted, "0.2");
		assert_eq!(quote.received_amount_formatted, "2.3");
		assert_eq!(quote.destination_address, "0xrecipient");
	}

	#[tokio::test]
	async fn below_minimum_withdrawal_halts_before_quoting() {
		let settlement = FakeSettlement::empty();
		let mut small = params("0.5");
		small.token.min_withdrawal_amount = "1000000".to_string();
		small.token.min_withdrawal_amount_formatted = "1".to_string();
		let balances = vec![balance(small.token.clone(), "10000000")];

		let err = get_withdraw_quote(&settlement, &balances, &wallet(), &small)
			.await
			.unwrap_err();
		assert!(matches!(err, Error::Validation(msg) if msg.contains("minimum withdrawal")));
		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn insufficient_balance_halts_before_quoting() {
		let settlement = FakeSettlement::empty();
		let balances = vec![balance(token("USDC", "eth", 6), "1000000")];

		let err = get_withdraw_quote(&settlement, &balances, &wallet(), &params("2.5"))
			.await
			.unwrap_err();
		assert!(matches!(err, Error::InsufficientBalance { .. }));
		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn quote_targets_the_destination_chain() {
		// Same asset on both sides, recipient on the destination chain.
		let settlement = FakeSettlement::with_quote(QuoteOutcome::Success(quote_response(
			"2500000", "2400000",
		)));
		let balances = vec![balance(token("USDC", "eth", 6), "10000000")];

		let outcome = get_withdraw_quote(&settlement, &balances, &wallet(), &params("2.5"))
			.await
			.unwrap();
		assert!(outcome.is_success());
		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn fee_never_underflows() {
		assert_eq!(transfer_fee("100", "250"), "0");
		assert_eq!(transfer_fee("garbage", "250"), "0");
	}
}
