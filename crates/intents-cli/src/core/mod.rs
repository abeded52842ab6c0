//! Application context, mode resolution and ambient concerns
//!
//! The `App` bundles the collaborator handles every command needs; it is
//! built once in `main` and passed by reference into command handlers so
//! tests can substitute fakes for any collaborator.

pub mod config;
pub mod logging;
pub mod wallet;

use std::sync::Arc;

pub use config::{ConfigStore, StoredConfig, WalletConfig};
pub use logging::init_logging;

use crate::services::{BalanceOracle, SettlementApi, TokenCatalog};

/// Invocation mode: a persistent menu-driven session, or strict one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliMode {
	Human,
	Agent,
}

impl CliMode {
	/// Resolve the invocation mode from flags and the stored preference.
	///
	/// clap rejects `--human --agent` before this runs; with neither flag,
	/// the stored preference applies, defaulting to agent.
	pub fn resolve(human: bool, agent: bool, preferred: Option<CliMode>) -> CliMode {
		if human {
			CliMode::Human
		} else if agent {
			CliMode::Agent
		} else {
			preferred.unwrap_or(CliMode::Agent)
		}
	}
}

impl std::str::FromStr for CliMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"human" => Ok(CliMode::Human),
			"agent" => Ok(CliMode::Agent),
			other => Err(format!("invalid mode: {} (valid values: human, agent)", other)),
		}
	}
}

/// Collaborator handles shared by every command.
pub struct App {
	pub catalog: Arc<dyn TokenCatalog>,
	pub balances: Arc<dyn BalanceOracle>,
	pub settlement: Arc<dyn SettlementApi>,
	pub config: ConfigStore,
}
