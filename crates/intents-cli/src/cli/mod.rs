//! Command-line interface definitions and parsing
//!
//! Defines the CLI structure using clap: the main parser, one subcommand per
//! action, and the global mode flags. `--human` and `--agent` are mutually
//! exclusive; with no subcommand and human mode preferred, the binary enters
//! the interactive session instead of printing help.

pub mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cross-chain token swaps, transfers and withdrawals via intent-based
/// settlement.
#[derive(Parser, Debug)]
#[command(name = "intents-cli")]
#[command(about = "Cross-chain token swaps via intent-based execution")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Start the interactive menu-driven session
	#[arg(global = true, long, conflicts_with = "agent")]
	pub human: bool,

	/// Strict non-interactive mode: every required flag must be supplied
	#[arg(global = true, long)]
	pub agent: bool,

	/// Prompt for missing parameters even when some flags are given
	#[arg(global = true, long)]
	pub interactive: bool,

	/// Show the quote without executing
	#[arg(global = true, long)]
	pub dry_run: bool,

	/// Enable debug logging
	#[arg(global = true, long, env = "INTENTS_DEBUG")]
	pub debug: bool,
}

/// Available CLI subcommands, one per user-facing action.
#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List or search supported tokens
	Tokens(TokensArgs),

	/// Show wallet balances
	Balances,

	/// Get a deposit address for a token
	Deposit(DepositArgs),

	/// Swap one token for another
	Swap(SwapArgs),

	/// Transfer to another settlement-layer account
	Transfer(TransferArgs),

	/// Withdraw to an external address
	Withdraw(WithdrawArgs),

	/// Manage settings (api-key, private-key, preferred-mode)
	Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct TokensArgs {
	/// Filter tokens by fuzzy search query
	#[arg(long)]
	pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct DepositArgs {
	/// Token symbol
	#[arg(long)]
	pub token: Option<String>,

	/// Blockchain (required if the token exists on multiple chains)
	#[arg(long)]
	pub blockchain: Option<String>,
}

#[derive(Args, Debug)]
pub struct SwapArgs {
	/// Source token symbol
	#[arg(long)]
	pub from: Option<String>,

	/// Source blockchain
	#[arg(long)]
	pub from_chain: Option<String>,

	/// Destination token symbol
	#[arg(long)]
	pub to: Option<String>,

	/// Destination blockchain
	#[arg(long)]
	pub to_chain: Option<String>,

	/// Amount to swap
	#[arg(long)]
	pub amount: Option<String>,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
	/// Destination settlement-layer address
	#[arg(long)]
	pub to: Option<String>,

	/// Amount to transfer
	#[arg(long)]
	pub amount: Option<String>,

	/// Token symbol
	#[arg(long)]
	pub token: Option<String>,

	/// Blockchain (if the token exists on multiple chains)
	#[arg(long)]
	pub blockchain: Option<String>,
}

#[derive(Args, Debug)]
pub struct WithdrawArgs {
	/// Destination address on the token's chain
	#[arg(long)]
	pub to: Option<String>,

	/// Amount to withdraw
	#[arg(long)]
	pub amount: Option<String>,

	/// Token symbol
	#[arg(long)]
	pub token: Option<String>,

	/// Blockchain (required if the token exists on multiple chains)
	#[arg(long)]
	pub blockchain: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
	#[command(subcommand)]
	pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
	/// Show current config
	Get,

	/// Save a config value
	Set {
		key: ConfigKey,
		value: String,
	},

	/// Generate a new wallet key pair
	GenerateWallet,

	/// Remove the config file
	Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKey {
	/// Settlement API key (removes the 0.1% fee)
	ApiKey,
	/// Wallet private key
	PrivateKey,
	/// Startup mode when neither --human nor --agent is given
	PreferredMode,
}
