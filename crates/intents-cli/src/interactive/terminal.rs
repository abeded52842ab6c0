//! Terminal-backed prompter
//!
//! Select and confirm prompts come from dialoguer; free-text input and the
//! search-as-you-type token picker are driven directly over raw key events
//! because dialoguer has no cancellable validated-input or dynamic-source
//! fuzzy picker. Every prompt treats Esc as cancellation and feeds the shared
//! `EscTracker` so the session loop can detect the double-Esc exit gesture.

use std::sync::Arc;

use console::{style, Key, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use intents_types::{Error, Result, Token};

use super::search::search_tokens;
use super::{token_label, EscTracker, InputValidator, PromptOutcome, Prompter};

/// Rows of token results visible at once in the picker.
const PICKER_HEIGHT: usize = 8;

pub struct TerminalPrompter {
	term: Term,
	tracker: Arc<EscTracker>,
}

impl TerminalPrompter {
	pub fn new(tracker: Arc<EscTracker>) -> Self {
		Self {
			term: Term::stderr(),
			tracker,
		}
	}

	pub fn tracker(&self) -> Arc<EscTracker> {
		Arc::clone(&self.tracker)
	}

	fn cancelled<T>(&self) -> PromptOutcome<T> {
		PromptOutcome::Cancelled {
			streak: self.tracker.register(),
		}
	}
}

fn map_io(err: std::io::Error) -> Error {
	if err.kind() == std::io::ErrorKind::Interrupted {
		Error::Interrupted
	} else {
		Error::Io(err)
	}
}

fn map_dialoguer(err: dialoguer::Error) -> Error {
	match err {
		dialoguer::Error::IO(io) => map_io(io),
	}
}

impl Prompter for TerminalPrompter {
	fn select(&self, message: &str, options: &[String]) -> Result<PromptOutcome<usize>> {
		let choice = Select::with_theme(&ColorfulTheme::default())
			.with_prompt(message)
			.items(options)
			.default(0)
			.interact_on_opt(&self.term)
			.map_err(map_dialoguer)?;
		match choice {
			Some(index) => {
				self.tracker.reset();
				Ok(PromptOutcome::Value(index))
			},
			None => Ok(self.cancelled()),
		}
	}

	fn input(&self, message: &str, validator: InputValidator) -> Result<PromptOutcome<String>> {
		let mut buffer = String::new();
		loop {
			self.term.clear_line().map_err(map_io)?;
			self.term
				.write_str(&format!("{} {}", style(format!("{}:", message)).bold(), buffer))
				.map_err(map_io)?;

			match self.term.read_key().map_err(map_io)? {
				Key::Char(c) => buffer.push(c),
				Key::Backspace => {
					buffer.pop();
				},
				Key::Enter => match validator(&buffer) {
					Ok(()) => {
						self.term.write_line("").map_err(map_io)?;
						self.tracker.reset();
						return Ok(PromptOutcome::Value(buffer));
					},
					Err(reason) => {
						self.term.write_line("").map_err(map_io)?;
						self.term
							.write_line(&style(reason).red().to_string())
							.map_err(map_io)?;
					},
				},
				Key::Escape => {
					self.term.write_line("").map_err(map_io)?;
					return Ok(self.cancelled());
				},
				_ => {},
			}
		}
	}

	fn confirm(&self, message: &str, default: bool) -> Result<PromptOutcome<bool>> {
		let choice = Confirm::with_theme(&ColorfulTheme::default())
			.with_prompt(message)
			.default(default)
			.interact_on_opt(&self.term)
			.map_err(map_dialoguer)?;
		match choice {
			Some(answer) => {
				self.tracker.reset();
				Ok(PromptOutcome::Value(answer))
			},
			None => Ok(self.cancelled()),
		}
	}

	fn select_token(
		&self,
		message: &str,
		initial_query: &str,
		tokens: &[Token],
	) -> Result<PromptOutcome<Token>> {
		let mut query = initial_query.to_string();
		let mut cursor = 0usize;
		let mut rendered_lines = 0usize;

		loop {
			let results = search_tokens(tokens, &query);
			if cursor >= results.len() {
				cursor = results.len().saturating_sub(1);
			}

			self.term.clear_last_lines(rendered_lines).map_err(map_io)?;
			self.term
				.write_line(&format!(
					"{} {} {}",
					style(format!("{}:", message)).bold(),
					query,
					style("(type to search, Esc to cancel)").dim()
				))
				.map_err(map_io)?;
			rendered_lines = 1;

			if results.is_empty() {
				self.term
					.write_line(&style("  no matches").dim().to_string())
					.map_err(map_io)?;
				rendered_lines += 1;
			} else {
				let (start, end) = visible_window(results.len(), cursor, PICKER_HEIGHT);
				for (offset, token) in results[start..end].iter().enumerate() {
					let line = if start + offset == cursor {
						format!("{} {}", style(">").cyan(), style(token_label(token)).cyan())
					} else {
						format!("  {}", token_label(token))
					};
					self.term.write_line(&line).map_err(map_io)?;
					rendered_lines += 1;
				}
			}

			match self.term.read_key().map_err(map_io)? {
				Key::Char(c) => {
					query.push(c);
					cursor = 0;
				},
				Key::Backspace => {
					query.pop();
					cursor = 0;
				},
				Key::ArrowUp => cursor = cursor.saturating_sub(1),
				Key::ArrowDown => {
					if cursor + 1 < results.len() {
						cursor += 1;
					}
				},
				Key::Enter => {
					if let Some(token) = results.get(cursor) {
						self.tracker.reset();
						return Ok(PromptOutcome::Value(token.clone()));
					}
				},
				Key::Escape => return Ok(self.cancelled()),
				_ => {},
			}
		}
	}
}

/// Window of results to draw, keeping the cursor in view.
fn visible_window(len: usize, cursor: usize, height: usize) -> (usize, usize) {
	if len <= height {
		return (0, len);
	}
	let start = cursor.saturating_sub(height - 1).min(len - height);
	(start, start + height)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_lists_are_fully_visible() {
		assert_eq!(visible_window(3, 0, 8), (0, 3));
		assert_eq!(visible_window(3, 2, 8), (0, 3));
	}

	#[test]
	fn window_follows_the_cursor() {
		assert_eq!(visible_window(50, 0, 8), (0, 8));
		assert_eq!(visible_window(50, 7, 8), (0, 8));
		assert_eq!(visible_window(50, 8, 8), (1, 9));
		assert_eq!(visible_window(50, 49, 8), (42, 50));
	}
}
