//! Command handlers
//!
//! One module per subcommand. Handlers take the shared `App`, an optional
//! prompter for interactive field resolution, and their parsed arguments;
//! they return the typed errors that `main` renders and converts into the
//! process exit code, or that the session loop displays and survives.

pub mod balances;
pub mod config;
pub mod deposit;
pub mod swap;
pub mod tokens;
pub mod transfer;
pub mod withdraw;

use intents_types::Result;

use crate::cli::output::Display;
use crate::cli::Commands;
use crate::core::App;
use crate::interactive::Prompter;

/// Route a parsed subcommand to its handler.
pub async fn dispatch(
	app: &App,
	prompter: Option<&dyn Prompter>,
	command: &Commands,
	dry_run: bool,
) -> Result<()> {
	match command {
		Commands::Tokens(args) => tokens::run(app, args).await,
		Commands::Balances => balances::run(app).await,
		Commands::Deposit(args) => deposit::run(app, prompter, args).await,
		Commands::Swap(args) => swap::run(app, prompter, args, dry_run).await,
		Commands::Transfer(args) => transfer::run(app, prompter, args, dry_run).await,
		Commands::Withdraw(args) => withdraw::run(app, prompter, args, dry_run).await,
		Commands::Config(args) => config::run(app, prompter, &args.command).await,
	}
}

/// Warn about the default fee tier before quoting when no API key is set.
pub(crate) fn show_fee_notice(app: &App) {
	if !app.config.has_api_key() {
		Display::warning(
			"No API key configured: a 0.1% service fee applies. Remove it with `intents-cli config set api-key <key>`.",
		);
	}
}
