//! Terminal output utilities and formatting
//!
//! Provides consistent formatting for CLI output: colored status messages,
//! key-value pairs, rulers, and aligned tables. Errors go to stderr,
//! everything else to stdout.

use colored::Colorize;

/// Terminal display utilities for formatted CLI output.
pub struct Display;

impl Display {
	/// Displays a formatted section header with underline.
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.len()).cyan());
	}

	/// Displays a success message with green checkmark.
	pub fn success(message: &str) {
		println!("{} {}", "✓".green().bold(), message);
	}

	/// Displays an error message with red X symbol to stderr.
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Displays a warning message with yellow warning symbol.
	pub fn warning(message: &str) {
		println!("{} {}", "⚠".yellow().bold(), message.yellow());
	}

	/// Displays an informational message with blue info symbol.
	pub fn info(message: &str) {
		println!("{} {}", "ℹ".blue().bold(), message);
	}

	/// Displays a key-value pair with formatted label.
	pub fn kv(key: &str, value: &str) {
		println!("  {} {}", format!("{}:", key).bold(), value);
	}

	/// Displays a dimmed progress line.
	pub fn step(message: &str) {
		println!("{}", message.dimmed());
	}

	/// Displays an aligned table with a separator under the header row.
	pub fn table(headers: &[&str], rows: &[Vec<String>]) {
		let widths: Vec<usize> = headers
			.iter()
			.enumerate()
			.map(|(i, h)| {
				rows.iter()
					.map(|r| r.get(i).map(String::len).unwrap_or(0))
					.chain(std::iter::once(h.len()))
					.max()
					.unwrap_or(0)
			})
			.collect();

		let header_row = headers
			.iter()
			.enumerate()
			.map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
			.collect::<Vec<_>>()
			.join(" | ");
		println!("{}", header_row.cyan().bold());
		println!(
			"{}",
			widths
				.iter()
				.map(|w| "-".repeat(*w))
				.collect::<Vec<_>>()
				.join("-|-")
		);
		for row in rows {
			let line = row
				.iter()
				.enumerate()
				.map(|(i, cell)| format!("{:<width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
				.collect::<Vec<_>>()
				.join(" | ");
			println!("{}", line);
		}
	}
}
