//! Token symbol resolution
//!
//! Disambiguates a user-supplied symbol into exactly one catalog token. The
//! outcome is a typed `Resolution` value rather than an error: ambiguity is
//! an entirely expected result that the interactive layer pattern-matches on
//! to decide whether to prompt, and only strict-mode callers convert the
//! non-match variants into command-boundary errors.

use intents_types::{Error, Result, Token};

/// Result of resolving a symbol against one catalog load.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
	/// Exactly one token matched.
	Match(Token),
	/// No exact case-insensitive symbol match exists.
	NotFound { symbol: String },
	/// The symbol exists on more than one chain and no hint was given.
	Ambiguous { symbol: String, chains: Vec<String> },
	/// The symbol exists, but not on the requested chain.
	NotFoundOnChain {
		symbol: String,
		requested: String,
		chains: Vec<String>,
	},
}

/// Resolve a symbol (and optional blockchain hint) over a token catalog.
///
/// Matching is case-insensitive on both symbol and blockchain. Pure over the
/// given slice; callers fetch the catalog themselves.
pub fn resolve(tokens: &[Token], symbol: &str, blockchain: Option<&str>) -> Resolution {
	let wanted = symbol.trim().to_lowercase();
	let matches: Vec<&Token> = tokens
		.iter()
		.filter(|t| t.symbol.to_lowercase() == wanted)
		.collect();

	if matches.is_empty() {
		return Resolution::NotFound {
			symbol: symbol.to_string(),
		};
	}

	if let Some(chain) = blockchain {
		let chain_lower = chain.trim().to_lowercase();
		match matches
			.iter()
			.find(|t| t.blockchain.to_lowercase() == chain_lower)
		{
			Some(token) => Resolution::Match((*token).clone()),
			None => Resolution::NotFoundOnChain {
				symbol: symbol.to_string(),
				requested: chain.to_string(),
				chains: distinct_chains(&matches),
			},
		}
	} else if matches.len() > 1 {
		let chains = distinct_chains(&matches);
		if chains.len() > 1 {
			Resolution::Ambiguous {
				symbol: symbol.to_string(),
				chains,
			}
		} else {
			// Duplicate catalog rows on a single chain; first wins.
			Resolution::Match(matches[0].clone())
		}
	} else {
		Resolution::Match(matches[0].clone())
	}
}

/// All exact case-insensitive symbol matches, in catalog order.
pub fn exact_matches(tokens: &[Token], symbol: &str) -> Vec<Token> {
	let wanted = symbol.trim().to_lowercase();
	tokens
		.iter()
		.filter(|t| t.symbol.to_lowercase() == wanted)
		.cloned()
		.collect()
}

fn distinct_chains(matches: &[&Token]) -> Vec<String> {
	let mut chains = Vec::new();
	for token in matches {
		if !chains.iter().any(|c: &String| c == &token.blockchain) {
			chains.push(token.blockchain.clone());
		}
	}
	chains
}

impl Resolution {
	/// Convert into a strict-mode result, naming the disambiguating flag in
	/// the error text.
	pub fn into_result(self, flag: &str) -> Result<Token> {
		match self {
			Resolution::Match(token) => Ok(token),
			Resolution::NotFound { symbol } => Err(Error::TokenNotFound(symbol)),
			Resolution::Ambiguous { symbol, chains } => {
				let options = chains
					.iter()
					.map(|c| format!("  {} {}", flag, c))
					.collect::<Vec<_>>()
					.join("\n");
				Err(Error::AmbiguousToken {
					symbol,
					flag: flag.to_string(),
					options,
				})
			},
			Resolution::NotFoundOnChain {
				symbol,
				requested,
				chains,
			} => {
				let available = chains
					.iter()
					.map(|c| format!("{} {}", flag, c))
					.collect::<Vec<_>>()
					.join(", ");
				Err(Error::TokenNotOnChain {
					symbol,
					blockchain: requested,
					available,
				})
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn token(symbol: &str, blockchain: &str) -> Token {
		Token {
			symbol: symbol.to_string(),
			blockchain: blockchain.to_string(),
			intents_token_id: format!("nep141:{}.{}", symbol.to_lowercase(), blockchain),
			near_token_id: format!("{}.{}", symbol.to_lowercase(), blockchain),
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
			token("SOL", "sol"),
		]
	}

	#[test]
	fn single_chain_symbol_resolves_without_a_hint() {
		match resolve(&catalog(), "NEAR", None) {
			Resolution::Match(t) => assert_eq!(t.blockchain, "near"),
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn multi_chain_symbol_without_hint_is_ambiguous_listing_exactly_those_chains() {
		match resolve(&catalog(), "USDC", None) {
			Resolution::Ambiguous { symbol, chains } => {
				assert_eq!(symbol, "USDC");
				assert_eq!(chains, vec!["eth".to_string(), "base".to_string()]);
			},
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn chain_hint_picks_the_matching_token() {
		match resolve(&catalog(), "USDC", Some("eth")) {
			Resolution::Match(t) => {
				assert_eq!(t.blockchain, "eth");
				assert_eq!(t.symbol, "USDC");
			},
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn matching_is_case_insensitive_on_both_keys() {
		match resolve(&catalog(), "usdc", Some("ETH")) {
			Resolution::Match(t) => assert_eq!(t.blockchain, "eth"),
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn unknown_symbol_is_not_found() {
		assert_eq!(
			resolve(&catalog(), "DOGE", None),
			Resolution::NotFound {
				symbol: "DOGE".to_string()
			}
		);
	}

	#[test]
	fn wrong_chain_reports_where_the_symbol_does_exist() {
		match resolve(&catalog(), "USDC", Some("sol")) {
			Resolution::NotFoundOnChain {
				requested, chains, ..
			} => {
				assert_eq!(requested, "sol");
				assert_eq!(chains, vec!["eth".to_string(), "base".to_string()]);
			},
			other => panic!("unexpected: {:?}", other),
		}
	}

	#[test]
	fn ambiguous_error_names_the_flag_for_every_chain() {
		let err = resolve(&catalog(), "USDC", None)
			.into_result("--from-chain")
			.unwrap_err();
		let text = err.to_string();
		assert!(text.contains("--from-chain eth"));
		assert!(text.contains("--from-chain base"));
	}

	#[test]
	fn duplicate_rows_on_one_chain_resolve_to_the_first() {
		let tokens = vec![token("WETH", "eth"), token("WETH", "eth")];
		match resolve(&tokens, "WETH", None) {
			Resolution::Match(t) => assert_eq!(t.blockchain, "eth"),
			other => panic!("unexpected: {:?}", other),
		}
	}
}
