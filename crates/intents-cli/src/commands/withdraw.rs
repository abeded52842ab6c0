//! `withdraw` command: quote and pay out to an external chain address.

use intents_types::{Error, ExecuteOutcome, QuoteOutcome, Result};

use crate::cli::output::Display;
use crate::cli::WithdrawArgs;
use crate::core::App;
use crate::interactive::{
	require_fields, resolve_address_field, resolve_amount_field, resolve_token_field, Prompter,
	TokenFieldSpec,
};
use crate::services::withdraw::{execute_withdraw, get_withdraw_quote, WithdrawParams};

pub async fn run(
	app: &App,
	prompter: Option<&dyn Prompter>,
	args: &WithdrawArgs,
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
	super::show_fee_notice(app);

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
			prompt_message: "Select token to withdraw",
			exclude_token_id: None,
			allowed_token_ids: None,
		},
	)?;
	let to_address = resolve_address_field(
		prompter,
		args.to.as_deref(),
		"--to is required",
		&format!("Destination address on {}", token.blockchain),
	)?;
	let amount = resolve_amount_field(
		prompter,
		args.amount.as_deref(),
		"--amount is required",
		&format!("Amount of {} to withdraw", token.symbol),
	)?;

	Display::step("Requesting quote...");
	let params = WithdrawParams {
		token: token.clone(),
		amount,
		to_address,
	};
	let quote =
		match get_withdraw_quote(app.settlement.as_ref(), &balances, &wallet, &params).await? {
			QuoteOutcome::Success(quote) => quote,
			QuoteOutcome::Error { message } => return Err(Error::Quote(message)),
		};

	Display::header("Withdrawal quote");
	Display::kv(
		"Amount",
		&format!("{} {}", quote.amount_formatted, token.symbol),
	);
	Display::kv(
		"Fee",
		&format!("{} {}", quote.transfer_fee_formatted, token.symbol),
	);
	Display::kv(
		"You receive",
		&format!(
			"{} {} on {}",
			quote.received_amount_formatted, token.symbol, token.blockchain
		),
	);
	Display::kv("To", &quote.destination_address);
	Display::kv("Expires", &quote.expires_at.to_rfc3339());

	if dry_run {
		Display::info("(Dry run - withdrawal not executed)");
		return Ok(());
	}

	if let Some(prompter) = prompter {
		let confirmed = prompter
			.confirm("Execute this withdrawal?", true)?
			.into_value()?;
		if !confirmed {
			Display::info("Withdrawal not executed.");
			return Ok(());
		}
	}

	Display::step("Executing withdrawal...");
	match execute_withdraw(app.settlement.as_ref(), &quote, &wallet).await {
		ExecuteOutcome::Success {
			tx_hash,
			explorer_link,
		} => {
			Display::success(&format!(
				"Withdrew {} {} to {}",
				quote.amount_formatted, token.symbol, quote.destination_address
			));
			Display::kv("Transaction", &tx_hash);
			Display::kv("Explorer", &explorer_link);
			Ok(())
		},
		ExecuteOutcome::Error { message } => Err(Error::Execute(message)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::config::{ConfigStore, StoredConfig};
	use crate::services::test_support::*;
	use std::sync::atomic::Ordering;
	use std::sync::Arc;

	fn test_app(settlement: Arc<FakeSettlement>, store_dir: &std::path::Path) -> App {
		let usdc = token("USDC", "eth", 6);
		let catalog = FakeCatalog::new(vec![usdc.clone()]);
		let oracle = FakeOracle {
			balances: vec![balance(usdc, "10000000")],
		};
		let config = ConfigStore::with_dir(store_dir.to_path_buf());
		let generated = crate::core::wallet::generate_wallet();
		config
			.write(&StoredConfig {
				private_key: Some(generated.private_key),
				..Default::default()
			})
			.unwrap();
		App {
			catalog: Arc::new(catalog),
			balances: Arc::new(oracle),
			settlement,
			config,
		}
	}

	fn args() -> WithdrawArgs {
		WithdrawArgs {
			to: Some("0xrecipient".to_string()),
			amount: Some("2.5".to_string()),
			token: Some("USDC".to_string()),
			blockchain: None,
		}
	}

	#[tokio::test]
	async fn dry_run_quotes_but_never_executes() {
		let settlement = Arc::new(FakeSettlement::with_quote(QuoteOutcome::Success(
			quote_response("2500000", "2300000"),
		)));
		let dir = tempfile::tempdir().unwrap();
		let app = test_app(Arc::clone(&settlement), dir.path());

		run(&app, None, &args(), true).await.unwrap();
		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 1);
		assert_eq!(settlement.execute_calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn one_shot_withdrawal_executes() {
		let settlement = Arc::new(FakeSettlement::with_quote(QuoteOutcome::Success(
			quote_response("2500000", "2300000"),
		)));
		let dir = tempfile::tempdir().unwrap();
		let app = test_app(Arc::clone(&settlement), dir.path());

		run(&app, None, &args(), false).await.unwrap();
		assert_eq!(settlement.execute_calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn declined_quote_becomes_a_quote_error() {
		let settlement = Arc::new(FakeSettlement::with_quote(QuoteOutcome::Error {
			message: "unsupported destination".to_string(),
		}));
		let dir = tempfile::tempdir().unwrap();
		let app = test_app(Arc::clone(&settlement), dir.path());

		let err = run(&app, None, &args(), false).await.unwrap_err();
		assert!(matches!(err, Error::Quote(msg) if msg == "unsupported destination"));
	}
}
