//! Weighted fuzzy token search
//!
//! Ranks catalog tokens against a free-text query for the search-as-you-type
//! picker. Each indexed field contributes its matcher score scaled by a fixed
//! weight; a token's score is the best single field, not a sum, so a strong
//! symbol hit always beats scattered partial matches.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use intents_types::Token;

/// Hard cap on returned results regardless of how many tokens match.
pub const MAX_SEARCH_RESULTS: usize = 50;

/// Minimum weighted score for a token to appear in the results at all.
const SCORE_THRESHOLD: f64 = 30.0;

const SYMBOL_WEIGHT: f64 = 2.0;
const NEAR_TOKEN_ID_WEIGHT: f64 = 1.5;
const BLOCKCHAIN_WEIGHT: f64 = 1.0;
const ASSET_IDENTIFIER_WEIGHT: f64 = 1.0;

/// Search the catalog, best matches first.
///
/// An empty or whitespace query returns the head of the catalog unranked, so
/// the picker always has something to show before the user starts typing.
pub fn search_tokens(tokens: &[Token], query: &str) -> Vec<Token> {
	let query = query.trim();
	if query.is_empty() {
		return tokens.iter().take(MAX_SEARCH_RESULTS).cloned().collect();
	}

	let matcher = SkimMatcherV2::default().ignore_case();
	let mut scored: Vec<(f64, &Token)> = tokens
		.iter()
		.filter_map(|token| {
			let score = score_token(&matcher, token, query);
			(score >= SCORE_THRESHOLD).then_some((score, token))
		})
		.collect();

	scored.sort_by(|a, b| {
		b.0.partial_cmp(&a.0)
			.unwrap_or(std::cmp::Ordering::Equal)
			.then_with(|| a.1.symbol.cmp(&b.1.symbol))
	});

	scored
		.into_iter()
		.take(MAX_SEARCH_RESULTS)
		.map(|(_, token)| token.clone())
		.collect()
}

fn score_token(matcher: &SkimMatcherV2, token: &Token, query: &str) -> f64 {
	let fields = [
		(token.symbol.as_str(), SYMBOL_WEIGHT),
		(token.near_token_id.as_str(), NEAR_TOKEN_ID_WEIGHT),
		(token.blockchain.as_str(), BLOCKCHAIN_WEIGHT),
		(token.asset_identifier.as_str(), ASSET_IDENTIFIER_WEIGHT),
	];
	fields
		.iter()
		.filter_map(|(field, weight)| {
			matcher
				.fuzzy_match(field, query)
				.map(|score| score as f64 * weight)
		})
		.fold(0.0, f64::max)
}
