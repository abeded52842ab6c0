//! `transfer` command: move funds between settlement-layer accounts.

use intents_types::{Error, ExecuteOutcome, Result, Token, TransferQuote};

use crate::cli::output::Display;
use crate::cli::TransferArgs;
use crate::core::App;
use crate::interactive::{
	require_fields, resolve_address_field, resolve_amount_field, resolve_token_field, Prompter,
	TokenFieldSpec,
};
use crate::services::transfer::{execute_transfer, prepare_transfer, TransferParams};

pub async fn run(
	app: &App,
	prompter: Option<&dyn Prompter>,
	args: &TransferArgs,
	dry_run: bool,
) -> Result<()> {
	let wallet = app.config.load_wallet()?;
	require_fields(
		prompter,
		&[
			(args.to.as_deref(), "--to is required"),
			(args.amount.as_deref(), "--amount is required"),
			(args.token.as_deref(), "--token is required"),
		],
	)?;

	Display::step("Fetching token directory...");
	let tokens = app.catalog.fetch().await?;
	let balances = app.balances.fetch(&wallet.wallet_address).await;

	let token = resolve_token_field(
		&tokens,
		prompter,
		TokenFieldSpec {
			symbol: args.token.as_deref(),
			blockchain: args.blockchain.as_deref(),
			flag_name: "--blockchain",
			required_error: "--token is required",
			prompt_message: "Select token to transfer",
			exclude_token_id: None,
			allowed_token_ids: None,
		},
	)?;
	let to_address = resolve_address_field(
		prompter,
		args.to.as_deref(),
		"--to is required",
		"Recipient address",
	)?;
	let amount = resolve_amount_field(
		prompter,
		args.amount.as_deref(),
		"--amount is required",
		&format!("Amount of {} to transfer", token.symbol),
	)?;

	let params = TransferParams {
		token: token.clone(),
		amount,
		to_address,
	};
	let quote = prepare_transfer(&balances, &params)?;

	Display::header("Transfer");
	for (label, value) in confirmation_rows(&quote, &token) {
		Display::kv(label, &value);
	}

	if dry_run {
		Display::info("(Dry run - transfer not executed)");
		return Ok(());
	}

	if let Some(prompter) = prompter {
		let confirmed = prompter
			.confirm("Execute this transfer?", true)?
			.into_value()?;
		if !confirmed {
			Display::info("Transfer not executed.");
			return Ok(());
		}
	}

	Display::step("Executing transfer...");
	match execute_transfer(app.settlement.as_ref(), &quote, &wallet).await {
		ExecuteOutcome::Success {
			tx_hash,
			explorer_link,
		} => {
			Display::success(&format!(
				"Transferred {} {} to {}",
				quote.amount_formatted, token.symbol, quote.to_address
			));
			Display::kv("Transaction", &tx_hash);
			Display::kv("Explorer", &explorer_link);
			Ok(())
		},
		ExecuteOutcome::Error { message } => Err(Error::Execute(message)),
	}
}

/// Confirmation rows. Transfers settle inside the settlement layer, so the
/// fee is zero and the recipient receives the full amount.
fn confirmation_rows(quote: &TransferQuote, token: &Token) -> Vec<(&'static str, String)> {
	vec![
		(
			"Amount",
			format!("{} {} ({})", quote.amount_formatted, token.symbol, token.blockchain),
		),
		("To", quote.to_address.clone()),
		("Fee", "0 (internal transfer)".to_string()),
		(
			"Recipient receives",
			format!("{} {}", quote.amount_formatted, token.symbol),
		),
	]
}
