//! `config` command: settings, key material and wallet generation.

use intents_types::{Error, Result};

use crate::cli::output::Display;
use crate::cli::{ConfigKey, ConfigSubcommand};
use crate::core::{wallet, App, CliMode};
use crate::interactive::Prompter;

pub async fn run(
	app: &App,
	prompter: Option<&dyn Prompter>,
	command: &ConfigSubcommand,
) -> Result<()> {
	match command {
		ConfigSubcommand::Get => get(app),
		ConfigSubcommand::Set { key, value } => set(app, *key, value),
		ConfigSubcommand::GenerateWallet => generate_wallet(app, prompter),
		ConfigSubcommand::Clear => clear(app, prompter),
	}
}

fn get(app: &App) -> Result<()> {
	Display::header("Configuration");
	Display::kv("Config file", &app.config.path().display().to_string());

	match app.config.api_key() {
		Some(key) => Display::kv("API key", &mask_api_key(&key)),
		None => Display::kv("API key", "(not set, 0.1% fee applies)"),
	}
	match app.config.private_key() {
		Some(key) => {
			Display::kv("Private key", &mask_private_key(&key));
			match wallet::address_from_private_key(&key) {
				Ok(address) => Display::kv("Wallet", &address),
				Err(e) => Display::warning(&format!("Stored private key is unusable: {}", e)),
			}
		},
		None => Display::kv("Private key", "(not set)"),
	}
	match app.config.preferred_mode() {
		Some(CliMode::Human) => Display::kv("Preferred mode", "human"),
		Some(CliMode::Agent) => Display::kv("Preferred mode", "agent"),
		None => Display::kv("Preferred mode", "(not set, defaults to agent)"),
	}
	Ok(())
}

fn set(app: &App, key: ConfigKey, value: &str) -> Result<()> {
	let mut stored = app.config.read();
	match key {
		ConfigKey::ApiKey => {
			stored.api_key = Some(value.to_string());
		},
		ConfigKey::PrivateKey => {
			// Reject unusable keys before persisting them.
			wallet::address_from_private_key(value)?;
			stored.private_key = Some(value.to_string());
		},
		ConfigKey::PreferredMode => {
			let mode: CliMode = value.parse().map_err(|reason| Error::InvalidConfigValue {
				key: "preferred-mode".to_string(),
				reason,
			})?;
			stored.preferred_mode = Some(mode);
		},
	}
	app.config.write(&stored)?;
	Display::success("Config saved.");
	Ok(())
}

fn generate_wallet(app: &App, prompter: Option<&dyn Prompter>) -> Result<()> {
	if app.config.private_key().is_some() {
		let overwrite = match prompter {
			Some(prompter) => prompter
				.confirm(
					"A private key already exists. Overwrite it? The old key is unrecoverable.",
					false,
				)?
				.into_value()?,
			None => false,
		};
		if !overwrite {
			return Err(Error::Validation(
				"A private key is already configured. Run `intents-cli config clear` first to replace it."
					.to_string(),
			));
		}
	}

	let generated = wallet::generate_wallet();
	let mut stored = app.config.read();
	stored.private_key = Some(generated.private_key.clone());
	app.config.write(&stored)?;

	Display::success("Wallet generated.");
	Display::kv("Wallet", &generated.wallet_address);
	Display::kv("Private key", &generated.private_key);
	Display::warning("Back up the private key now. It is stored unencrypted and shown only once.");
	Ok(())
}

fn clear(app: &App, prompter: Option<&dyn Prompter>) -> Result<()> {
	if let Some(prompter) = prompter {
		let confirmed = prompter
			.confirm("Delete the config file, including any stored private key?", false)?
			.into_value()?;
		if !confirmed {
			Display::info("Config kept.");
			return Ok(());
		}
	}
	app.config.clear()?;
	Display::success("Config cleared.");
	Ok(())
}

fn mask_api_key(key: &str) -> String {
	// Count and slice by characters so multibyte keys cannot split mid-char.
	let chars: Vec<char> = key.chars().collect();
	if chars.len() <= 12 {
		return "****".to_string();
	}
	let head: String = chars[..8].iter().collect();
	let tail: String = chars[chars.len() - 4..].iter().collect();
	format!("{}...{}", head, tail)
}

fn mask_private_key(key: &str) -> String {
	format!("{}:****", wallet::key_prefix(key))
}
