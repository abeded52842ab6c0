//! `tokens` command: list or search the supported token directory.

use intents_types::Result;

use crate::cli::output::Display;
use crate::cli::TokensArgs;
use crate::core::App;
use crate::interactive::search::{search_tokens, MAX_SEARCH_RESULTS};

pub async fn run(app: &App, args: &TokensArgs) -> Result<()> {
	Display::step("Fetching token directory...");
	let tokens = app.catalog.fetch().await?;
	let total = tokens.len();

	let shown = match args.search.as_deref() {
		Some(query) => search_tokens(&tokens, query),
		None => tokens,
	};

	match args.search.as_deref() {
		Some(query) => Display::header(&format!("Tokens matching '{}'", query)),
		None => Display::header("Supported tokens"),
	}

	if shown.is_empty() {
		Display::info("No matching tokens.");
		return Ok(());
	}

	let rows: Vec<Vec<String>> = shown
		.iter()
		.map(|t| {
			vec![
				t.symbol.clone(),
				t.blockchain.clone(),
				t.near_token_id.clone(),
				format!("${}", t.price_usd),
			]
		})
		.collect();
	Display::table(&["SYMBOL", "CHAIN", "TOKEN ID", "PRICE"], &rows);

	if args.search.is_some() && shown.len() == MAX_SEARCH_RESULTS {
		Display::info(&format!(
			"Showing the top {} matches of {} tokens.",
			MAX_SEARCH_RESULTS, total
		));
	} else {
		Display::info(&format!("{} tokens.", shown.len()));
	}
	Ok(())
}
