//! Menu-driven human session
//!
//! A persistent loop over the same command handlers the one-shot CLI uses,
//! with every handler given a prompter. Command failures are displayed and
//! the loop continues; only the double-Esc gesture, an explicit Exit pick,
//! or Ctrl-C ends the session. A process-wide guard makes starting a second
//! session a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use intents_types::{Error, Result};

use crate::cli::output::Display;
use crate::cli::{DepositArgs, SwapArgs, TokensArgs, TransferArgs, WithdrawArgs};
use crate::commands;
use crate::core::App;
use crate::interactive::terminal::TerminalPrompter;
use crate::interactive::{is_interactive_terminal, EscTracker, PromptOutcome, Prompter};

/// Guards against nested sessions within one process.
pub struct SessionGuard {
	running: AtomicBool,
}

impl SessionGuard {
	pub const fn new() -> Self {
		Self {
			running: AtomicBool::new(false),
		}
	}

	/// Claim the session slot. Returns false when a session already runs.
	pub fn start(&self) -> bool {
		self.running
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_ok()
	}

	pub fn stop(&self) {
		self.running.store(false, Ordering::SeqCst);
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}
}

static SESSION: SessionGuard = SessionGuard::new();

const MENU: &[&str] = &[
	"Swap tokens",
	"Transfer to another account",
	"Withdraw to an external address",
	"Get a deposit address",
	"Show balances",
	"Browse tokens",
	"Settings",
	"Help",
	"Exit",
];

/// Run the interactive session until the user exits.
pub async fn run_session(app: &App) -> Result<()> {
	if !SESSION.start() {
		debug!("Session already running, ignoring nested start");
		return Ok(());
	}
	let result = session_loop(app).await;
	SESSION.stop();
	result
}

async fn session_loop(app: &App) -> Result<()> {
	if !is_interactive_terminal() {
		return Err(Error::NotATerminal);
	}

	let prompter = TerminalPrompter::new(Arc::new(EscTracker::new()));

	Display::header("NEAR Intents");
	Display::step("Esc twice to exit at any point.");

	loop {
		let options: Vec<String> = MENU.iter().map(|s| s.to_string()).collect();
		let choice = match prompter.select("What would you like to do?", &options) {
			Ok(PromptOutcome::Value(index)) => index,
			Ok(PromptOutcome::Cancelled { streak }) => {
				if streak >= 2 {
					break;
				}
				Display::info("Press Esc again quickly to exit.");
				continue;
			},
			Err(Error::Interrupted) => break,
			Err(e) => return Err(e),
		};

		let outcome = match choice {
			0 => {
				let args = SwapArgs {
					from: None,
					from_chain: None,
					to: None,
					to_chain: None,
					amount: None,
				};
				commands::swap::run(app, Some(&prompter), &args, false).await
			},
			1 => {
				let args = TransferArgs {
					to: None,
					amount: None,
					token: None,
					blockchain: None,
				};
				commands::transfer::run(app, Some(&prompter), &args, false).await
			},
			2 => {
				let args = WithdrawArgs {
					to: None,
					amount: None,
					token: None,
					blockchain: None,
				};
				commands::withdraw::run(app, Some(&prompter), &args, false).await
			},
			3 => {
				let args = DepositArgs {
					token: None,
					blockchain: None,
				};
				commands::deposit::run(app, Some(&prompter), &args).await
			},
			4 => commands::balances::run(app).await,
			5 => tokens_flow(app, &prompter).await,
			6 => settings_menu(app, &prompter).await,
			7 => {
				show_help();
				Ok(())
			},
			_ => break,
		};

		match outcome {
			Ok(()) => {},
			Err(Error::Cancelled { streak }) => {
				if streak >= 2 {
					break;
				}
				// Single Esc unwinds the current flow back to the menu.
			},
			Err(Error::Interrupted) => break,
			Err(e) => Display::error(&e.to_string()),
		}
	}

	Display::info("Goodbye.");
	Ok(())
}

/// Browse tokens, optionally narrowing with a search query first.
async fn tokens_flow(app: &App, prompter: &dyn Prompter) -> Result<()> {
	let search = prompter
		.confirm("Search for a specific token?", false)?
		.into_value()?;
	let query = if search {
		Some(
			prompter
				.input("Search query", &|candidate| {
					if candidate.trim().is_empty() {
						Err("Enter a query".to_string())
					} else {
						Ok(())
					}
				})?
				.into_value()?,
		)
	} else {
		None
	};
	commands::tokens::run(app, &TokensArgs { search: query }).await
}

async fn settings_menu(app: &App, prompter: &dyn Prompter) -> Result<()> {
	let options: Vec<String> = [
		"Show settings",
		"Set API key",
		"Set private key",
		"Generate a new wallet",
		"Set preferred mode",
		"Clear all settings",
		"Back",
	]
	.iter()
	.map(|s| s.to_string())
	.collect();

	loop {
		let choice = prompter
			.select("Settings", &options)?
			.into_value()?;
		use crate::cli::{ConfigKey, ConfigSubcommand};
		let outcome = match choice {
			0 => commands::config::run(app, Some(prompter), &ConfigSubcommand::Get).await,
			1 => {
				let value = prompter
					.input("API key", &non_empty_validator)?
					.into_value()?;
				commands::config::run(
					app,
					Some(prompter),
					&ConfigSubcommand::Set {
						key: ConfigKey::ApiKey,
						value,
					},
				)
				.await
			},
			2 => {
				let value = prompter
					.input("Private key (ed25519:...)", &non_empty_validator)?
					.into_value()?;
				commands::config::run(
					app,
					Some(prompter),
					&ConfigSubcommand::Set {
						key: ConfigKey::PrivateKey,
						value,
					},
				)
				.await
			},
			3 => {
				commands::config::run(app, Some(prompter), &ConfigSubcommand::GenerateWallet)
					.await
			},
			4 => {
				let modes = vec!["human".to_string(), "agent".to_string()];
				let index = prompter
					.select("Mode when started without flags", &modes)?
					.into_value()?;
				commands::config::run(
					app,
					Some(prompter),
					&ConfigSubcommand::Set {
						key: ConfigKey::PreferredMode,
						value: modes[index].clone(),
					},
				)
				.await
			},
			5 => commands::config::run(app, Some(prompter), &ConfigSubcommand::Clear).await,
			_ => return Ok(()),
		};
		match outcome {
			Ok(()) => {},
			Err(Error::Cancelled { streak }) if streak < 2 => {},
			Err(e) => return Err(e),
		}
	}
}

fn non_empty_validator(candidate: &str) -> std::result::Result<(), String> {
	if candidate.trim().is_empty() {
		Err("Value cannot be empty".to_string())
	} else {
		Ok(())
	}
}

fn show_help() {
	Display::header("Help");
	Display::info("Swap: trade one token for another inside the settlement layer.");
	Display::info("Transfer: move funds to another settlement-layer account, no fee.");
	Display::info("Withdraw: pay out to an address on the token's own chain.");
	Display::info("Deposit: get an address for funding your wallet from an external chain.");
	Display::info("Every action can also run one-shot, e.g. `intents-cli swap --from USDC --to NEAR --amount 10`.");
	Display::info("Press Esc to back out of any prompt; press it twice quickly to exit.");
}
