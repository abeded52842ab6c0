//! `deposit` command: bridge deposit address for funding the wallet.

use intents_types::Result;

use crate::cli::output::Display;
use crate::cli::DepositArgs;
use crate::core::App;
use crate::interactive::{require_fields, resolve_token_field, Prompter, TokenFieldSpec};

pub async fn run(app: &App, prompter: Option<&dyn Prompter>, args: &DepositArgs) -> Result<()> {
	let wallet = app.config.load_wallet()?;
	require_fields(prompter, &[(args.token.as_deref(), "--token is required")])?;
	Display::step("Fetching token directory...");
	let tokens = app.catalog.fetch().await?;

	let token = resolve_token_field(
		&tokens,
		prompter,
		TokenFieldSpec {
			symbol: args.token.as_deref(),
			blockchain: args.blockchain.as_deref(),
			flag_name: "--blockchain",
			required_error: "--token is required",
			prompt_message: "Select token to deposit",
			exclude_token_id: None,
			allowed_token_ids: None,
		},
	)?;

	Display::step("Requesting deposit address...");
	let deposit = app
		.settlement
		.deposit_address(&wallet.wallet_address, &token)
		.await?;

	Display::header(&format!("Deposit {} ({})", token.symbol, token.blockchain));
	Display::kv("Address", &deposit.address);
	Display::kv("Chain", &deposit.chain);
	if let Some(memo) = &deposit.memo {
		Display::kv("Memo", memo);
		Display::warning("Include the memo or the deposit will be lost.");
	}
	if token.min_deposit_amount != "0" {
		Display::info(&format!(
			"Minimum deposit: {} {}",
			token.min_deposit_amount_formatted, token.symbol
		));
	}
	Display::warning(&format!(
		"Send only {} on {} to this address.",
		token.symbol, token.blockchain
	));
	Ok(())
}
