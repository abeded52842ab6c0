//! Binary entry point
//!
//! Parses the CLI, builds the shared application context with the HTTP
//! collaborators, resolves the invocation mode, and either enters the human
//! session or dispatches a one-shot command. Typed errors render through the
//! display layer and become exit code 1.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};

use intents_cli::cli::output::Display;
use intents_cli::cli::{Cli, Commands};
use intents_cli::commands;
use intents_cli::core::{init_logging, App, CliMode, ConfigStore};
use intents_cli::human;
use intents_cli::interactive::terminal::TerminalPrompter;
use intents_cli::interactive::{
	is_interactive_terminal, should_use_interactive, EscTracker, Prompter,
};
use intents_cli::services::{
	HttpBalanceOracle, HttpSettlementApi, HttpTokenCatalog, TokenCatalog,
};

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.debug);

	match run(cli).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			Display::error(&e.to_string());
			ExitCode::FAILURE
		},
	}
}

async fn run(cli: Cli) -> intents_types::Result<()> {
	let config = ConfigStore::new();
	let catalog: Arc<dyn TokenCatalog> = Arc::new(HttpTokenCatalog::new()?);
	let settlement = HttpSettlementApi::new(config.api_key())?;
	let balances = HttpBalanceOracle::new(Arc::clone(&catalog))?;
	let app = App {
		catalog,
		balances: Arc::new(balances),
		settlement: Arc::new(settlement),
		config,
	};

	let mode = CliMode::resolve(cli.human, cli.agent, app.config.preferred_mode());

	let command = match &cli.command {
		Some(command) => command,
		None => {
			if mode == CliMode::Human {
				return human::run_session(&app).await;
			}
			Cli::command().print_help()?;
			return Ok(());
		},
	};

	let tty = is_interactive_terminal();
	let interactive = match command {
		// Listing commands have no fields to prompt for.
		Commands::Tokens(_) | Commands::Balances => false,
		// Config confirmations (overwrite, clear) want a prompter whenever
		// one is possible.
		Commands::Config(_) => tty && !cli.agent,
		_ => should_use_interactive(tty, cli.interactive, cli.agent, &required_fields(command)),
	};

	let prompter = interactive.then(|| TerminalPrompter::new(Arc::new(EscTracker::new())));
	commands::dispatch(
		&app,
		prompter.as_ref().map(|p| p as &dyn Prompter),
		command,
		cli.dry_run,
	)
	.await
}

/// The flags whose absence pulls a command into interactive mode.
fn required_fields(command: &Commands) -> Vec<Option<&str>> {
	match command {
		Commands::Swap(args) => vec![
			args.from.as_deref(),
			args.to.as_deref(),
			args.amount.as_deref(),
		],
		Commands::Transfer(args) => vec![
			args.to.as_deref(),
			args.amount.as_deref(),
			args.token.as_deref(),
		],
		Commands::Withdraw(args) => vec![
			args.to.as_deref(),
			args.amount.as_deref(),
			args.token.as_deref(),
		],
		Commands::Deposit(args) => vec![args.token.as_deref()],
		Commands::Tokens(_) | Commands::Balances | Commands::Config(_) => vec![],
	}
}
