//! Error taxonomy for the intents CLI
//!
//! Local, pre-network failures (validation, ambiguity, lookups, balance
//! pre-checks) are distinct variants so the interactive layer can decide
//! which of them convert into a guided prompt. Quote and execute failures
//! from the settlement collaborator are NOT represented here: those travel
//! as typed success/error outcome values (see `quote`), because a declined
//! quote is an expected result, not an exceptional one.

/// Convenience Result type alias using the local Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Validation errors: always local, raised before any network call.
	#[error("{0}")]
	Validation(String),

	#[error("Invalid amount: {0}")]
	InvalidAmount(String),

	// Token resolution errors.
	#[error("Token not found: {0}")]
	TokenNotFound(String),

	#[error("Multiple tokens found for {symbol}. Specify {flag}:\n{options}")]
	AmbiguousToken {
		symbol: String,
		flag: String,
		options: String,
	},

	#[error("Token {symbol} not found on {blockchain}. Available on: {available}")]
	TokenNotOnChain {
		symbol: String,
		blockchain: String,
		available: String,
	},

	// Balance pre-check, advisory but fails fast before quoting.
	#[error("Insufficient balance. Available: {available} {symbol}")]
	InsufficientBalance { available: String, symbol: String },

	// Preconditions.
	#[error(
		"Private key required. Provide via:\n  intents-cli config generate-wallet\n  intents-cli config set private-key <key>\n  INTENTS_PRIVATE_KEY environment variable"
	)]
	MissingPrivateKey,

	#[error("--human requires an interactive terminal")]
	NotATerminal,

	// Prompt flow control: a cancelled prompt is unwound, never executed.
	#[error("Cancelled")]
	Cancelled { streak: u32 },

	#[error("Interrupted")]
	Interrupted,

	// Config store.
	#[error("Invalid config value for {key}: {reason}")]
	InvalidConfigValue { key: String, reason: String },

	// Quote/execute failures, converted from outcome values at the command
	// boundary once no prompt can recover them.
	#[error("{0}")]
	Quote(String),

	#[error("{0}")]
	Execute(String),

	// Collaborator transport failures (catalog fetch, RPC, settlement HTTP).
	#[error("API request failed: {0}")]
	Api(String),

	#[error("Invalid API response: {0}")]
	InvalidApiResponse(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Whether the interactive layer may convert this failure into a guided
	/// prompt instead of propagating it. Everything else is terminal for the
	/// current command.
	pub fn is_promptable(&self) -> bool {
		matches!(
			self,
			Error::Validation(_)
				| Error::TokenNotFound(_)
				| Error::AmbiguousToken { .. }
				| Error::TokenNotOnChain { .. }
		)
	}
}
