//! Fixed-point conversion between base units and decimal strings
//!
//! All on-chain amounts are integers in base units; human-facing amounts are
//! decimal strings derived from a token's declared decimal count. Conversion
//! is exact string arithmetic over U256. The parse path never goes through
//! floating point, so formatting a base-unit amount and parsing it back
//! reproduces the original integer for any decimal count.

use alloy_primitives::U256;

use crate::error::{Error, Result};

/// Parse a decimal amount string into base units for the given decimal count.
///
/// Rejects empty, non-numeric, and negative input, and input with more
/// fractional digits than the token declares.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
	let trimmed = amount.trim();
	if trimmed.is_empty() {
		return Err(Error::InvalidAmount(amount.to_string()));
	}

	let (whole, frac) = match trimmed.split_once('.') {
		Some((w, f)) => (w, f),
		None => (trimmed, ""),
	};

	if whole.is_empty() && frac.is_empty() {
		return Err(Error::InvalidAmount(amount.to_string()));
	}
	if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
		return Err(Error::InvalidAmount(amount.to_string()));
	}
	if frac.len() > decimals as usize {
		// Excess precision would silently truncate value; refuse instead.
		let significant = frac[decimals as usize..].trim_end_matches('0');
		if !significant.is_empty() {
			return Err(Error::InvalidAmount(format!(
				"{} has more than {} decimal places",
				amount, decimals
			)));
		}
	}

	let scale = U256::from(10).pow(U256::from(decimals));
	let whole_part = if whole.is_empty() {
		U256::ZERO
	} else {
		U256::from_str_radix(whole, 10).map_err(|_| Error::InvalidAmount(amount.to_string()))?
	};

	let mut padded = frac.to_string();
	padded.truncate(decimals as usize);
	while padded.len() < decimals as usize {
		padded.push('0');
	}
	let frac_part = if padded.is_empty() {
		U256::ZERO
	} else {
		U256::from_str_radix(&padded, 10).map_err(|_| Error::InvalidAmount(amount.to_string()))?
	};

	whole_part
		.checked_mul(scale)
		.and_then(|w| w.checked_add(frac_part))
		.ok_or_else(|| Error::InvalidAmount(format!("{} is too large", amount)))
}

/// Format a base-unit amount as a decimal string for the given decimal count.
///
/// Trailing zeros in the fractional part are trimmed; a whole amount renders
/// with a bare integer part ("1" rather than "1.0") so the output re-parses
/// to the identical base-unit value.
pub fn format_units(amount: U256, decimals: u8) -> String {
	if decimals == 0 {
		return amount.to_string();
	}

	let divisor = U256::from(10).pow(U256::from(decimals));
	let whole = amount / divisor;
	let fractional = amount % divisor;

	let fractional_str = format!("{:0>width$}", fractional, width = decimals as usize);
	let trimmed = fractional_str.trim_end_matches('0');

	if trimmed.is_empty() {
		whole.to_string()
	} else {
		format!("{}.{}", whole, trimmed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_whole_and_fractional_amounts() {
		assert_eq!(parse_units("1", 6).unwrap(), U256::from(1_000_000u64));
		assert_eq!(parse_units("0.1", 6).unwrap(), U256::from(100_000u64));
		assert_eq!(parse_units("100", 6).unwrap(), U256::from(100_000_000u64));
		assert_eq!(
			parse_units("1.5", 18).unwrap(),
			U256::from(1_500_000_000_000_000_000u128)
		);
		assert_eq!(parse_units(".5", 2).unwrap(), U256::from(50u64));
		assert_eq!(parse_units(" 2.25 ", 2).unwrap(), U256::from(225u64));
	}

	#[test]
	fn rejects_invalid_input() {
		assert!(parse_units("", 6).is_err());
		assert!(parse_units("abc", 6).is_err());
		assert!(parse_units("-1", 6).is_err());
		assert!(parse_units("1.2.3", 6).is_err());
		assert!(parse_units(".", 6).is_err());
		// More fractional digits than the token declares.
		assert!(parse_units("0.1234567", 6).is_err());
		// Trailing zeros beyond the declared precision carry no value.
		assert_eq!(parse_units("0.1200000", 2).unwrap(), U256::from(12u64));
	}

	#[test]
	fn formats_with_trimmed_fraction() {
		assert_eq!(format_units(U256::from(1_000_000u64), 6), "1");
		assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
		assert_eq!(format_units(U256::from(100_000u64), 6), "0.1");
		assert_eq!(format_units(U256::ZERO, 6), "0");
		assert_eq!(format_units(U256::from(42u64), 0), "42");
	}

	#[test]
	fn round_trips_base_units_for_every_decimal_count() {
		let samples: [u128; 6] = [0, 1, 7, 1_000_000, 123_456_789_012_345, u64::MAX as u128];
		for decimals in 0u8..=24 {
			for &raw in &samples {
				let base = U256::from(raw);
				let formatted = format_units(base, decimals);
				let reparsed = parse_units(&formatted, decimals).unwrap();
				assert_eq!(reparsed, base, "decimals={} raw={}", decimals, raw);
			}
		}
	}
}
