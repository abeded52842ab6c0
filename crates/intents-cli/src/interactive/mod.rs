//! Interactive resolution layer
//!
//! Bridges strict flag parsing and guided prompting. Commands describe the
//! fields they need; when a field is missing or ambiguous and a prompter is
//! available, the user is walked through picking a value instead of getting
//! an error. Without a prompter the same paths produce the typed errors the
//! resolver defines, so agent callers see deterministic failures.
//!
//! Cancellation is data, not control flow: every prompt returns a
//! `PromptOutcome` and an Esc press surfaces as `Cancelled` carrying the
//! current quick-press streak, which the session loop uses for the
//! double-Esc exit gesture.

pub mod search;
pub mod terminal;

use std::collections::HashSet;
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use intents_types::{Error, Result, Token};

use crate::resolver::{self, Resolution};

/// Window within which two Esc presses count as a deliberate exit gesture.
pub const ESC_STREAK_WINDOW: Duration = Duration::from_millis(1500);

/// Outcome of a single prompt. Cancellation is an ordinary value so callers
/// decide whether it unwinds one field or the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome<T> {
	Value(T),
	/// User pressed Esc. `streak` counts consecutive quick presses.
	Cancelled { streak: u32 },
}

impl<T> PromptOutcome<T> {
	/// Unwrap the value or convert cancellation into its error form.
	pub fn into_value(self) -> Result<T> {
		match self {
			PromptOutcome::Value(value) => Ok(value),
			PromptOutcome::Cancelled { streak } => Err(Error::Cancelled { streak }),
		}
	}
}

/// Validator callback for free-text prompts. Returns a message to display
/// when the candidate input should be rejected and re-asked.
pub type InputValidator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// Prompt surface the resolution layer talks to. The terminal implementation
/// drives a real TTY; tests substitute a scripted fake.
pub trait Prompter: Send + Sync {
	/// Pick one of `options` by index.
	fn select(&self, message: &str, options: &[String]) -> Result<PromptOutcome<usize>>;

	/// Free-text input, re-prompting until `validator` accepts.
	fn input(&self, message: &str, validator: InputValidator) -> Result<PromptOutcome<String>>;

	fn confirm(&self, message: &str, default: bool) -> Result<PromptOutcome<bool>>;

	/// Search-as-you-type token picker over the given candidates.
	fn select_token(
		&self,
		message: &str,
		initial_query: &str,
		tokens: &[Token],
	) -> Result<PromptOutcome<Token>>;
}

/// Tracks consecutive quick Esc presses across prompts.
///
/// A press within `ESC_STREAK_WINDOW` of the previous one extends the streak;
/// a slower press restarts it at 1. Any completed prompt resets it.
#[derive(Debug)]
pub struct EscTracker {
	state: Mutex<(u32, Option<Instant>)>,
}

impl EscTracker {
	pub fn new() -> Self {
		Self {
			state: Mutex::new((0, None)),
		}
	}

	/// Record an Esc press now and return the updated streak.
	pub fn register(&self) -> u32 {
		self.register_at(Instant::now())
	}

	pub fn register_at(&self, at: Instant) -> u32 {
		let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
		let (streak, last) = *state;
		let next = match last {
			Some(prev) if at.duration_since(prev) <= ESC_STREAK_WINDOW => streak + 1,
			_ => 1,
		};
		*state = (next, Some(at));
		next
	}

	/// Reset after any prompt completes with a value.
	pub fn reset(&self) {
		let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
		*state = (0, None);
	}
}

impl Default for EscTracker {
	fn default() -> Self {
		Self::new()
	}
}

/// Whether both stdin and stdout are attached to a terminal.
pub fn is_interactive_terminal() -> bool {
	std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Decide whether a command runs interactively.
///
/// Interactivity requires a TTY and is never entered under `--agent`. Given
/// those, either the explicit flag or any missing required field enables it.
pub fn should_use_interactive(
	tty: bool,
	interactive_flag: bool,
	agent: bool,
	required_fields: &[Option<&str>],
) -> bool {
	if !tty || agent {
		return false;
	}
	interactive_flag
		|| required_fields
			.iter()
			.any(|f| f.map_or(true, |v| v.trim().is_empty()))
}

/// Strict-mode presence check for required flags, run before any network
/// fetch so a missing flag fails with no side effects. Interactive callers
/// skip it; their missing fields become prompts instead.
pub fn require_fields(
	prompter: Option<&dyn Prompter>,
	fields: &[(Option<&str>, &str)],
) -> Result<()> {
	if prompter.is_some() {
		return Ok(());
	}
	for (value, error) in fields {
		if value.map_or(true, |v| v.trim().is_empty()) {
			return Err(Error::Validation(error.to_string()));
		}
	}
	Ok(())
}

/// Everything needed to resolve one token-valued field.
pub struct TokenFieldSpec<'a> {
	pub symbol: Option<&'a str>,
	pub blockchain: Option<&'a str>,
	/// Flag named in strict-mode errors, e.g. `--from-chain`.
	pub flag_name: &'a str,
	pub required_error: &'a str,
	pub prompt_message: &'a str,
	/// Token to hide from pickers (the swap origin, when picking the target).
	pub exclude_token_id: Option<&'a str>,
	/// When set, restrict candidates to these intents token ids.
	pub allowed_token_ids: Option<&'a HashSet<String>>,
}

/// Resolve a token field against the catalog, prompting where allowed.
pub fn resolve_token_field(
	tokens: &[Token],
	prompter: Option<&dyn Prompter>,
	spec: TokenFieldSpec<'_>,
) -> Result<Token> {
	let candidates: Vec<Token> = tokens
		.iter()
		.filter(|t| spec.exclude_token_id != Some(t.intents_token_id.as_str()))
		.filter(|t| {
			spec.allowed_token_ids
				.map_or(true, |ids| ids.contains(&t.intents_token_id))
		})
		.cloned()
		.collect();

	let symbol = spec.symbol.map(str::trim).filter(|s| !s.is_empty());

	match symbol {
		Some(symbol) => {
			let resolution = resolver::resolve(&candidates, symbol, spec.blockchain);
			match (resolution, prompter) {
				(Resolution::Match(token), _) => Ok(token),
				(resolution, None) => resolution.into_result(spec.flag_name),
				(Resolution::Ambiguous { symbol, chains }, Some(prompter)) => {
					pick_chain_then_token(&candidates, prompter, &symbol, &chains)
				},
				(Resolution::NotFoundOnChain { symbol, chains, .. }, Some(prompter)) => {
					pick_chain_then_token(&candidates, prompter, &symbol, &chains)
				},
				(Resolution::NotFound { symbol }, Some(prompter)) => prompter
					.select_token(spec.prompt_message, &symbol, &candidates)?
					.into_value(),
			}
		},
		None => match prompter {
			None => Err(Error::Validation(spec.required_error.to_string())),
			Some(prompter) => {
				let scoped = match spec.blockchain {
					Some(chain) => {
						let chain = chain.trim().to_lowercase();
						candidates
							.iter()
							.filter(|t| t.blockchain.to_lowercase() == chain)
							.cloned()
							.collect()
					},
					None => pick_chain_scope(&candidates, prompter)?,
				};
				prompter
					.select_token(spec.prompt_message, "", &scoped)?
					.into_value()
			},
		},
	}
}

/// Blockchain-first narrowing when no symbol was given at all: ask which chain
/// before opening the search picker, so the picker only shows tokens on the
/// chosen chain. A single represented chain skips the prompt.
fn pick_chain_scope(candidates: &[Token], prompter: &dyn Prompter) -> Result<Vec<Token>> {
	let mut chains: Vec<String> = Vec::new();
	for token in candidates {
		let chain = token.blockchain.to_lowercase();
		if !chains.contains(&chain) {
			chains.push(chain);
		}
	}
	if chains.len() <= 1 {
		return Ok(candidates.to_vec());
	}

	let index = prompter.select("Select blockchain", &chains)?.into_value()?;
	let chosen = &chains[index];
	Ok(candidates
		.iter()
		.filter(|t| t.blockchain.to_lowercase() == *chosen)
		.cloned()
		.collect())
}

/// Narrow an ambiguous symbol by asking for the chain, then return the token
/// on that chain. A single remaining chain skips the prompt.
fn pick_chain_then_token(
	candidates: &[Token],
	prompter: &dyn Prompter,
	symbol: &str,
	chains: &[String],
) -> Result<Token> {
	let matches = resolver::exact_matches(candidates, symbol);
	if matches.len() == 1 {
		return Ok(matches.into_iter().next().ok_or_else(|| {
			Error::TokenNotFound(symbol.to_string())
		})?);
	}
	if matches.is_empty() {
		return prompter
			.select_token("Select token", symbol, candidates)?
			.into_value();
	}
	if chains.len() == 1 {
		return resolver::resolve(candidates, symbol, Some(&chains[0]))
			.into_result("--blockchain");
	}

	let message = format!("{} exists on multiple chains. Pick one", symbol);
	let index = prompter.select(&message, chains)?.into_value()?;
	resolver::resolve(candidates, symbol, Some(&chains[index])).into_result("--blockchain")
}

/// Resolve an amount field.
///
/// A present, well-formed positive amount is accepted trimmed. In strict mode
/// a missing amount is a validation error, while a present but malformed one
/// is passed through unmodified for the downstream parser to reject with its
/// own context. Interactively, both cases fall into a validated prompt.
pub fn resolve_amount_field(
	prompter: Option<&dyn Prompter>,
	raw: Option<&str>,
	required_error: &str,
	prompt_message: &str,
) -> Result<String> {
	if let Some(raw) = raw {
		let trimmed = raw.trim();
		if is_valid_positive_amount(trimmed) {
			return Ok(trimmed.to_string());
		}
		if prompter.is_none() {
			if trimmed.is_empty() {
				return Err(Error::Validation(required_error.to_string()));
			}
			return Ok(raw.to_string());
		}
	} else if prompter.is_none() {
		return Err(Error::Validation(required_error.to_string()));
	}

	let prompter = prompter.ok_or_else(|| Error::Validation(required_error.to_string()))?;
	prompter
		.input(prompt_message, &|candidate| {
			if is_valid_positive_amount(candidate.trim()) {
				Ok(())
			} else {
				Err("Enter a positive number".to_string())
			}
		})?
		.into_value()
}

/// Resolve a free-text address field, requiring a non-blank value.
pub fn resolve_address_field(
	prompter: Option<&dyn Prompter>,
	raw: Option<&str>,
	required_error: &str,
	prompt_message: &str,
) -> Result<String> {
	if let Some(raw) = raw {
		let trimmed = raw.trim();
		if !trimmed.is_empty() {
			return Ok(trimmed.to_string());
		}
	}
	match prompter {
		None => Err(Error::Validation(required_error.to_string())),
		Some(prompter) => prompter
			.input(prompt_message, &|candidate| {
				if candidate.trim().is_empty() {
					Err("Address cannot be empty".to_string())
				} else {
					Ok(())
				}
			})?
			.into_value(),
	}
}

/// A decimal literal that parses to a finite, strictly positive number.
pub fn is_valid_positive_amount(raw: &str) -> bool {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return false;
	}
	match trimmed.parse::<f64>() {
		Ok(value) => value.is_finite() && value > 0.0,
		Err(_) => false,
	}
}

/// Display label for a token in pickers: symbol, chain, and the tail of the
/// contract id for disambiguation.
pub fn token_label(token: &Token) -> String {
	let id = &token.near_token_id;
	// Tail by characters, not bytes, so multibyte ids cannot split mid-char.
	let tail = match id.char_indices().rev().nth(7) {
		Some((start, _)) if start > 0 => format!("...{}", &id[start..]),
		_ => id.clone(),
	};
	format!("{} ({}) · {}", token.symbol, token.blockchain, tail)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Mutex as StdMutex;

	fn token(symbol: &str, blockchain: &str) -> Token {
		Token {
			symbol: symbol.to_string(),
			blockchain: blockchain.to_string(),
			intents_token_id: format!("nep141:{}.{}", symbol.to_lowercase(), blockchain),
			near_token_id: format!("{}.{}.omft.near", symbol.to_lowercase(), blockchain),
			asset_identifier: format!("{}:{}", blockchain, symbol.to_lowercase()),
			decimals: 6,
			price_usd: "1.0".to_string(),
			min_deposit_amount: "0".to_string(),
			min_deposit_amount_formatted: "0".to_string(),
			min_withdrawal_amount: "0".to_string(),
			min_withdrawal_amount_formatted: "0".to_string(),
			withdrawal_fee: "0".to_string(),
			withdrawal_fee_formatted: "0".to_string(),
			contract_address: None,
		}
	}

	fn catalog() -> Vec<Token> {
		vec![
			token("USDC", "eth"),
			token("USDC", "base"),
			token("NEAR", "near"),
		]
	}

	/// Scripted prompter. `select` always picks the given index, `input`
	/// feeds candidates through the validator in order and returns the first
	/// accepted one, mirroring how the terminal re-prompts on rejection.
	struct FakePrompter {
		select_index: usize,
		select_calls: AtomicUsize,
		inputs: StdMutex<Vec<String>>,
		token_pick: Option<Token>,
		/// Chains of the candidates handed to the last `select_token` call.
		picker_chains: StdMutex<Vec<String>>,
	}

	impl FakePrompter {
		fn new() -> Self {
			Self {
				select_index: 0,
				select_calls: AtomicUsize::new(0),
				inputs: StdMutex::new(Vec::new()),
				token_pick: None,
				picker_chains: StdMutex::new(Vec::new()),
			}
		}

		fn with_inputs(inputs: &[&str]) -> Self {
			Self {
				inputs: StdMutex::new(inputs.iter().map(|s| s.to_string()).collect()),
				..Self::new()
			}
		}
	}

	impl Prompter for FakePrompter {
		fn select(&self, _message: &str, options: &[String]) -> Result<PromptOutcome<usize>> {
			assert!(self.select_index < options.len());
			self.select_calls.fetch_add(1, Ordering::SeqCst);
			Ok(PromptOutcome::Value(self.select_index))
		}

		fn input(
			&self,
			_message: &str,
			validator: InputValidator,
		) -> Result<PromptOutcome<String>> {
			let mut inputs = self.inputs.lock().unwrap();
			while !inputs.is_empty() {
				let candidate = inputs.remove(0);
				if validator(&candidate).is_ok() {
					return Ok(PromptOutcome::Value(candidate));
				}
			}
			Ok(PromptOutcome::Cancelled { streak: 1 })
		}

		fn confirm(&self, _message: &str, default: bool) -> Result<PromptOutcome<bool>> {
			Ok(PromptOutcome::Value(default))
		}

		fn select_token(
			&self,
			_message: &str,
			_initial_query: &str,
			tokens: &[Token],
		) -> Result<PromptOutcome<Token>> {
			*self.picker_chains.lock().unwrap() =
				tokens.iter().map(|t| t.blockchain.clone()).collect();
			match &self.token_pick {
				Some(token) => Ok(PromptOutcome::Value(token.clone())),
				None => match tokens.first() {
					Some(token) => Ok(PromptOutcome::Value(token.clone())),
					None => Ok(PromptOutcome::Cancelled { streak: 1 }),
				},
			}
		}
	}

	struct CancellingPrompter;

	impl Prompter for CancellingPrompter {
		fn select(&self, _m: &str, _o: &[String]) -> Result<PromptOutcome<usize>> {
			Ok(PromptOutcome::Cancelled { streak: 1 })
		}
		fn input(&self, _m: &str, _v: InputValidator) -> Result<PromptOutcome<String>> {
			Ok(PromptOutcome::Cancelled { streak: 1 })
		}
		fn confirm(&self, _m: &str, _d: bool) -> Result<PromptOutcome<bool>> {
			Ok(PromptOutcome::Cancelled { streak: 1 })
		}
		fn select_token(
			&self,
			_m: &str,
			_q: &str,
			_t: &[Token],
		) -> Result<PromptOutcome<Token>> {
			Ok(PromptOutcome::Cancelled { streak: 1 })
		}
	}

	fn spec<'a>(symbol: Option<&'a str>, blockchain: Option<&'a str>) -> TokenFieldSpec<'a> {
		TokenFieldSpec {
			symbol,
			blockchain,
			flag_name: "--blockchain",
			required_error: "--token is required",
			prompt_message: "Select token",
			exclude_token_id: None,
			allowed_token_ids: None,
		}
	}

	#[test]
	fn strict_mode_missing_symbol_is_a_validation_error() {
		let err = resolve_token_field(&catalog(), None, spec(None, None)).unwrap_err();
		assert!(matches!(err, Error::Validation(msg) if msg == "--token is required"));
	}

	#[test]
	fn strict_mode_ambiguity_is_a_typed_error() {
		let err = resolve_token_field(&catalog(), None, spec(Some("USDC"), None)).unwrap_err();
		assert!(matches!(err, Error::AmbiguousToken { .. }));
	}

	#[test]
	fn interactive_ambiguity_prompts_for_the_chain() {
		let prompter = FakePrompter::new();
		let token =
			resolve_token_field(&catalog(), Some(&prompter), spec(Some("USDC"), None)).unwrap();
		// FakePrompter picks the first listed chain.
		assert_eq!(token.blockchain, "eth");
	}

	#[test]
	fn interactive_unknown_symbol_falls_into_the_search_picker() {
		let prompter = FakePrompter::new();
		let token =
			resolve_token_field(&catalog(), Some(&prompter), spec(Some("DOGE"), None)).unwrap();
		assert_eq!(token.symbol, "USDC");
	}

	#[test]
	fn interactive_missing_symbol_opens_the_picker() {
		let prompter = FakePrompter::new();
		let token = resolve_token_field(&catalog(), Some(&prompter), spec(None, None)).unwrap();
		assert_eq!(token.symbol, "USDC");
	}

	#[test]
	fn missing_symbol_asks_for_the_chain_before_the_picker() {
		let prompter = FakePrompter::new();
		let token = resolve_token_field(&catalog(), Some(&prompter), spec(None, None)).unwrap();

		// One chain prompt, and the picker only saw tokens on the chosen chain.
		assert_eq!(prompter.select_calls.load(Ordering::SeqCst), 1);
		assert_eq!(token.blockchain, "eth");
		let chains = prompter.picker_chains.lock().unwrap();
		assert!(!chains.is_empty());
		assert!(chains.iter().all(|c| c == "eth"));
	}

	#[test]
	fn single_chain_candidates_skip_the_chain_prompt() {
		let tokens = vec![token("USDC", "eth"), token("WETH", "eth")];
		let prompter = FakePrompter::new();
		let picked = resolve_token_field(&tokens, Some(&prompter), spec(None, None)).unwrap();

		assert_eq!(prompter.select_calls.load(Ordering::SeqCst), 0);
		assert_eq!(picked.symbol, "USDC");
	}

	#[test]
	fn explicit_blockchain_flag_skips_the_chain_prompt() {
		let prompter = FakePrompter::new();
		let token =
			resolve_token_field(&catalog(), Some(&prompter), spec(None, Some("base"))).unwrap();

		assert_eq!(prompter.select_calls.load(Ordering::SeqCst), 0);
		assert_eq!(token.blockchain, "base");
	}

	#[test]
	fn exclude_filter_removes_the_origin_token() {
		let tokens = catalog();
		let excluded = tokens[0].intents_token_id.clone();
		let prompter = FakePrompter::new();
		let mut field = spec(None, None);
		field.exclude_token_id = Some(&excluded);
		let token = resolve_token_field(&tokens, Some(&prompter), field).unwrap();
		assert_ne!(token.intents_token_id, excluded);
	}

	#[test]
	fn allowed_ids_restrict_the_candidates() {
		let tokens = catalog();
		let mut allowed = HashSet::new();
		allowed.insert(tokens[2].intents_token_id.clone());
		let prompter = FakePrompter::new();
		let mut field = spec(None, None);
		field.allowed_token_ids = Some(&allowed);
		let token = resolve_token_field(&tokens, Some(&prompter), field).unwrap();
		assert_eq!(token.symbol, "NEAR");
	}

	#[test]
	fn cancellation_surfaces_as_the_cancelled_error() {
		let err =
			resolve_token_field(&catalog(), Some(&CancellingPrompter), spec(None, None))
				.unwrap_err();
		assert!(matches!(err, Error::Cancelled { streak: 1 }));
	}

	#[test]
	fn valid_amount_is_accepted_trimmed() {
		let amount = resolve_amount_field(None, Some("  2.5 "), "required", "Amount").unwrap();
		assert_eq!(amount, "2.5");
	}

	#[test]
	fn strict_mode_passes_malformed_amounts_through_unmodified() {
		let amount = resolve_amount_field(None, Some("12abc"), "required", "Amount").unwrap();
		assert_eq!(amount, "12abc");
	}

	#[test]
	fn strict_mode_missing_amount_is_a_validation_error() {
		for raw in [None, Some(""), Some("   ")] {
			let err = resolve_amount_field(None, raw, "amount required", "Amount").unwrap_err();
			assert!(matches!(err, Error::Validation(msg) if msg == "amount required"));
		}
	}

	#[test]
	fn interactive_amount_reprompts_until_valid() {
		let prompter = FakePrompter::with_inputs(&["-5", "abc", "2.5"]);
		let amount =
			resolve_amount_field(Some(&prompter), None, "required", "Amount").unwrap();
		assert_eq!(amount, "2.5");
	}

	#[test]
	fn interactive_invalid_amount_also_prompts() {
		let prompter = FakePrompter::with_inputs(&["7"]);
		let amount =
			resolve_amount_field(Some(&prompter), Some("zero"), "required", "Amount").unwrap();
		assert_eq!(amount, "7");
	}

	#[test]
	fn address_field_requires_a_non_blank_value() {
		let err = resolve_address_field(None, Some("  "), "to required", "Recipient").unwrap_err();
		assert!(matches!(err, Error::Validation(msg) if msg == "to required"));

		let addr = resolve_address_field(None, Some(" alice.near "), "req", "Recipient").unwrap();
		assert_eq!(addr, "alice.near");
	}

	#[test]
	fn positive_amount_validation() {
		assert!(is_valid_positive_amount("1"));
		assert!(is_valid_positive_amount(" 0.0001 "));
		assert!(!is_valid_positive_amount("0"));
		assert!(!is_valid_positive_amount("-3"));
		assert!(!is_valid_positive_amount("abc"));
		assert!(!is_valid_positive_amount(""));
		assert!(!is_valid_positive_amount("inf"));
		assert!(!is_valid_positive_amount("NaN"));
	}

	#[test]
	fn esc_streak_grows_within_the_window_and_restarts_after_it() {
		let tracker = EscTracker::new();
		let start = Instant::now();
		assert_eq!(tracker.register_at(start), 1);
		assert_eq!(
			tracker.register_at(start + Duration::from_millis(500)),
			2
		);
		assert_eq!(
			tracker.register_at(start + Duration::from_millis(900)),
			3
		);
		// Past the window since the last press, streak restarts.
		assert_eq!(
			tracker.register_at(start + Duration::from_millis(3000)),
			1
		);
	}

	#[test]
	fn esc_streak_resets_on_completed_prompt() {
		let tracker = EscTracker::new();
		let start = Instant::now();
		tracker.register_at(start);
		tracker.reset();
		assert_eq!(
			tracker.register_at(start + Duration::from_millis(100)),
			1
		);
	}

	#[test]
	fn interactivity_requires_a_tty_and_no_agent_flag() {
		assert!(!should_use_interactive(false, true, false, &[None]));
		assert!(!should_use_interactive(true, true, true, &[None]));
		assert!(should_use_interactive(true, true, false, &[Some("x")]));
		assert!(should_use_interactive(true, false, false, &[Some("x"), None]));
		assert!(should_use_interactive(true, false, false, &[Some("  ")]));
		assert!(!should_use_interactive(true, false, false, &[Some("x")]));
	}

	#[test]
	fn token_label_shows_symbol_chain_and_id_tail() {
		let label = token_label(&token("USDC", "eth"));
		assert!(label.starts_with("USDC (eth)"));
		assert!(label.contains("..."));
	}

	#[test]
	fn token_label_tail_never_splits_multibyte_ids() {
		let mut multibyte = token("USDC", "eth");
		multibyte.near_token_id = "токен.контракт.omft.near".to_string();
		let label = token_label(&multibyte);
		assert!(label.contains("..."));
		assert!(label.ends_with("...mft.near"));

		// Short ids are shown whole.
		let mut short = token("USDC", "eth");
		short.near_token_id = "токен".to_string();
		assert!(token_label(&short).ends_with("токен"));
	}
}
