//! `balances` command: settlement-layer holdings for the configured wallet.

use intents_types::Result;

use crate::cli::output::Display;
use crate::core::App;

pub async fn run(app: &App) -> Result<()> {
	let wallet = app.config.load_wallet()?;
	Display::step("Fetching balances...");
	let balances = app.balances.fetch(&wallet.wallet_address).await;

	Display::header("Balances");
	Display::kv("Wallet", &wallet.wallet_address);

	if balances.is_empty() {
		Display::info("No balances. Fund the wallet with `intents-cli deposit`.");
		return Ok(());
	}

	let rows: Vec<Vec<String>> = balances
		.iter()
		.map(|b| {
			vec![
				b.token.symbol.clone(),
				b.token.blockchain.clone(),
				b.balance_formatted.clone(),
				usd_value(&b.balance_formatted, &b.token.price_usd),
			]
		})
		.collect();
	Display::table(&["SYMBOL", "CHAIN", "BALANCE", "VALUE (USD)"], &rows);
	Ok(())
}

fn usd_value(balance_formatted: &str, price_usd: &str) -> String {
	let balance: f64 = balance_formatted.parse().unwrap_or(0.0);
	let price: f64 = price_usd.parse().unwrap_or(0.0);
	if price == 0.0 {
		return "-".to_string();
	}
	format!("${:.2}", balance * price)
}
