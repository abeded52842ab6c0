//! `swap` command: quote, optional confirmation, execution.

use std::collections::HashSet;

use intents_types::{Error, ExecuteOutcome, QuoteOutcome, Result};

use crate::cli::output::Display;
use crate::cli::SwapArgs;
use crate::core::App;
use crate::interactive::{
	require_fields, resolve_amount_field, resolve_token_field, Prompter, TokenFieldSpec,
};
use crate::services::swap::{execute_swap, get_swap_quote, SwapParams};

pub async fn run(
	app: &App,
	prompter: Option<&dyn Prompter>,
	args: &SwapArgs,
	dry_run: bool,
) -> Result<()> {
	let wallet = app.config.load_wallet()?;
	require_fields(
		prompter,
		&[
			(args.from.as_deref(), "--from is required"),
			(args.to.as_deref(), "--to is required"),
			(args.amount.as_deref(), "--amount is required"),
		],
	)?;
	super::show_fee_notice(app);

	Display::step("Fetching token directory...");
	let tokens = app.catalog.fetch().await?;
	let balances = app.balances.fetch(&wallet.wallet_address).await;

	// When picking interactively, only tokens the wallet actually holds make
	// sense as a swap source.
	let held: HashSet<String> = balances
		.iter()
		.map(|b| b.token.intents_token_id.clone())
		.collect();
	let restrict_to_held = prompter.is_some() && args.from.is_none() && !held.is_empty();

	let from = resolve_token_field(
		&tokens,
		prompter,
		TokenFieldSpec {
			symbol: args.from.as_deref(),
			blockchain: args.from_chain.as_deref(),
			flag_name: "--from-chain",
			required_error: "--from is required",
			prompt_message: "Select token to swap from",
			exclude_token_id: None,
			allowed_token_ids: restrict_to_held.then_some(&held),
		},
	)?;
	let to = resolve_token_field(
		&tokens,
		prompter,
		TokenFieldSpec {
			symbol: args.to.as_deref(),
			blockchain: args.to_chain.as_deref(),
			flag_name: "--to-chain",
			required_error: "--to is required",
			prompt_message: "Select token to receive",
			exclude_token_id: Some(&from.intents_token_id),
			allowed_token_ids: None,
		},
	)?;
	let amount = resolve_amount_field(
		prompter,
		args.amount.as_deref(),
		"--amount is required",
		&format!("Amount of {} to swap", from.symbol),
	)?;

	Display::step("Requesting quote...");
	let params = SwapParams {
		from: from.clone(),
		to: to.clone(),
		amount,
	};
	let quote = match get_swap_quote(app.settlement.as_ref(), &balances, &wallet, &params).await? {
		QuoteOutcome::Success(quote) => quote,
		QuoteOutcome::Error { message } => return Err(Error::Quote(message)),
	};

	Display::header("Swap quote");
	Display::kv(
		"From",
		&format!("{} {} ({})", quote.amount_in_formatted, from.symbol, from.blockchain),
	);
	Display::kv(
		"To",
		&format!("{} {} ({})", quote.amount_out_formatted, to.symbol, to.blockchain),
	);
	Display::kv(
		"Rate",
		&format!("1 {} = {} {}", from.symbol, quote.exchange_rate, to.symbol),
	);
	Display::kv("Expires", &quote.expires_at.to_rfc3339());

	if dry_run {
		Display::info("(Dry run - swap not executed)");
		return Ok(());
	}

	if let Some(prompter) = prompter {
		let confirmed = prompter.confirm("Execute this swap?", true)?.into_value()?;
		if !confirmed {
			Display::info("Swap not executed.");
			return Ok(());
		}
	}

	Display::step("Executing swap...");
	match execute_swap(app.settlement.as_ref(), &quote, &wallet).await {
		ExecuteOutcome::Success {
			tx_hash,
			explorer_link,
		} => {
			Display::success(&format!(
				"Swapped {} {} for {} {}",
				quote.amount_in_formatted, from.symbol, quote.amount_out_formatted, to.symbol
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
	use crate::cli::SwapArgs;
	use crate::core::config::{ConfigStore, StoredConfig};
	use crate::services::test_support::*;
	use std::sync::atomic::Ordering;
	use std::sync::Arc;

	fn test_app(
		settlement: Arc<FakeSettlement>,
		store_dir: &std::path::Path,
	) -> (App, Arc<FakeCatalog>) {
		let usdc = token("USDC", "eth", 6);
		let weth = token("WETH", "eth", 18);
		let catalog = Arc::new(FakeCatalog::new(vec![usdc.clone(), weth]));
		let shared_catalog: Arc<dyn crate::services::TokenCatalog> = catalog.clone();
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
		let app = App {
			catalog: shared_catalog,
			balances: Arc::new(oracle),
			settlement,
			config,
		};
		(app, catalog)
	}

	fn args(amount: &str) -> SwapArgs {
		SwapArgs {
			from: Some("USDC".to_string()),
			from_chain: None,
			to: Some("WETH".to_string()),
			to_chain: None,
			amount: Some(amount.to_string()),
		}
	}

	#[tokio::test]
	async fn dry_run_quotes_but_never_executes() {
		let settlement = Arc::new(FakeSettlement::with_quote(QuoteOutcome::Success(
			quote_response("2500000", "1250000000000000000"),
		)));
		let dir = tempfile::tempdir().unwrap();
		let (app, _catalog) = test_app(Arc::clone(&settlement), dir.path());

		run(&app, None, &args("2.5"), true).await.unwrap();

		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 1);
		assert_eq!(settlement.execute_calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn one_shot_executes_without_confirmation() {
		let settlement = Arc::new(FakeSettlement::with_quote(QuoteOutcome::Success(
			quote_response("2500000", "1250000000000000000"),
		)));
		let dir = tempfile::tempdir().unwrap();
		let (app, _catalog) = test_app(Arc::clone(&settlement), dir.path());

		run(&app, None, &args("2.5"), false).await.unwrap();

		assert_eq!(settlement.execute_calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn declined_quote_becomes_a_quote_error() {
		let settlement = Arc::new(FakeSettlement::with_quote(QuoteOutcome::Error {
			message: "no route".to_string(),
		}));
		let dir = tempfile::tempdir().unwrap();
		let (app, _catalog) = test_app(Arc::clone(&settlement), dir.path());

		let err = run(&app, None, &args("2.5"), false).await.unwrap_err();
		assert!(matches!(err, Error::Quote(msg) if msg == "no route"));
		assert_eq!(settlement.execute_calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn insufficient_balance_never_reaches_the_quote_service() {
		let settlement = Arc::new(FakeSettlement::empty());
		let dir = tempfile::tempdir().unwrap();
		let (app, _catalog) = test_app(Arc::clone(&settlement), dir.path());

		let err = run(&app, None, &args("1000"), false).await.unwrap_err();
		assert!(matches!(err, Error::InsufficientBalance { .. }));
		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn missing_flags_in_strict_mode_are_validation_errors() {
		let settlement = Arc::new(FakeSettlement::empty());
		let dir = tempfile::tempdir().unwrap();
		let (app, catalog) = test_app(Arc::clone(&settlement), dir.path());

		let empty = SwapArgs {
			from: None,
			from_chain: None,
			to: None,
			to_chain: None,
			amount: None,
		};
		let err = run(&app, None, &empty, false).await.unwrap_err();
		assert!(matches!(err, Error::Validation(msg) if msg == "--from is required"));
		// The missing flag fails before any collaborator is touched.
		assert_eq!(catalog.fetch_calls.load(Ordering::SeqCst), 0);
		assert_eq!(settlement.quote_calls.load(Ordering::SeqCst), 0);
	}
}
