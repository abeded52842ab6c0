//! File-backed configuration store
//!
//! Settings live in a single JSON file under `~/.intents-cli` (overridable
//! via `INTENTS_CONFIG_DIR`). The API key and private key each fall back to
//! an environment variable when absent from the file, with the file taking
//! priority.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use intents_types::{Error, Result};

use super::wallet;
use super::CliMode;

const CONFIG_DIR_ENV: &str = "INTENTS_CONFIG_DIR";
const API_KEY_ENV: &str = "INTENTS_API_KEY";
const PRIVATE_KEY_ENV: &str = "INTENTS_PRIVATE_KEY";

/// On-disk configuration contents. All fields optional; an absent file reads
/// as the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub private_key: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preferred_mode: Option<CliMode>,
}

/// Wallet identity materialized from the stored private key.
#[derive(Debug, Clone)]
pub struct WalletConfig {
	pub private_key: String,
	pub wallet_address: String,
}

/// Handle to the config file location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
	dir: PathBuf,
}

impl ConfigStore {
	pub fn new() -> Self {
		let dir = std::env::var(CONFIG_DIR_ENV)
			.map(PathBuf::from)
			.ok()
			.or_else(|| dirs::home_dir().map(|home| home.join(".intents-cli")))
			.unwrap_or_else(|| PathBuf::from(".intents-cli"));
		Self { dir }
	}

	/// Store rooted at an explicit directory, for tests.
	pub fn with_dir(dir: PathBuf) -> Self {
		Self { dir }
	}

	pub fn path(&self) -> PathBuf {
		self.dir.join("config.json")
	}

	/// Read the stored config, treating a missing or unreadable file as empty.
	pub fn read(&self) -> StoredConfig {
		let path = self.path();
		match fs::read_to_string(&path) {
			Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
				debug!(path = %path.display(), error = %e, "Ignoring malformed config file");
				StoredConfig::default()
			}),
			Err(_) => StoredConfig::default(),
		}
	}

	pub fn write(&self, config: &StoredConfig) -> Result<()> {
		fs::create_dir_all(&self.dir)?;
		let json = serde_json::to_string_pretty(config)?;
		fs::write(self.path(), json)?;
		Ok(())
	}

	pub fn clear(&self) -> Result<()> {
		let path = self.path();
		if path.exists() {
			fs::remove_file(path)?;
		}
		Ok(())
	}

	/// API key, file first, then environment.
	pub fn api_key(&self) -> Option<String> {
		self.read()
			.api_key
			.or_else(|| std::env::var(API_KEY_ENV).ok())
	}

	pub fn has_api_key(&self) -> bool {
		self.api_key().is_some()
	}

	/// Private key, file first, then environment.
	pub fn private_key(&self) -> Option<String> {
		self.read()
			.private_key
			.or_else(|| std::env::var(PRIVATE_KEY_ENV).ok())
	}

	pub fn preferred_mode(&self) -> Option<CliMode> {
		self.read().preferred_mode
	}

	/// Load the wallet identity, failing when no private key is configured.
	pub fn load_wallet(&self) -> Result<WalletConfig> {
		let private_key = self.private_key().ok_or(Error::MissingPrivateKey)?;
		let wallet_address = wallet::address_from_private_key(&private_key)?;
		Ok(WalletConfig {
			private_key,
			wallet_address,
		})
	}

	pub fn try_load_wallet(&self) -> Option<WalletConfig> {
		self.load_wallet().ok()
	}
}

impl Default for ConfigStore {
	fn default() -> Self {
		Self::new()
	}
}
