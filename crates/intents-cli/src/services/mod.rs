//! External collaborators and orchestration
//!
//! Three seams, each a trait so command flows are testable without a network:
//! the token catalog (merged directory of swappable assets), the balance
//! oracle (settlement-layer holdings per wallet), and the settlement API
//! (quotes, intent execution, deposit addresses). The orchestrator modules
//! compose them into the quote/execute flows the commands call.

pub mod balances;
pub mod catalog;
pub mod settlement;
pub mod swap;
pub mod transfer;
pub mod withdraw;

use alloy_primitives::U256;
use async_trait::async_trait;

use intents_types::{
	DepositAddress, QuoteOutcome, QuoteRequest, QuoteResponse, Result, Settlement, Token,
	TokenBalance,
};

use crate::core::config::WalletConfig;

pub use balances::HttpBalanceOracle;
pub use catalog::HttpTokenCatalog;
pub use settlement::HttpSettlementApi;

/// Directory of tokens supported by the settlement layer.
#[async_trait]
pub trait TokenCatalog: Send + Sync {
	async fn fetch(&self) -> Result<Vec<Token>>;
}

/// Settlement-layer balances for a wallet.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
	/// Fetch non-zero balances. Infallible by contract: oracle failures
	/// degrade to an empty list so balance display never blocks a command.
	async fn fetch(&self, wallet_address: &str) -> Vec<TokenBalance>;
}

/// Quote and execution surface of the settlement collaborator.
#[async_trait]
pub trait SettlementApi: Send + Sync {
	/// Request a quote. Declined quotes come back as a typed outcome; only
	/// transport-level failures are errors.
	async fn request_quote(&self, request: &QuoteRequest) -> Result<QuoteOutcome<QuoteResponse>>;

	/// Sign and submit the intent funding a previously obtained quote.
	async fn execute_quote(
		&self,
		quote: &QuoteResponse,
		wallet: &WalletConfig,
	) -> Result<Settlement>;

	/// Direct settlement-layer transfer between accounts, no quote involved.
	async fn transfer(
		&self,
		token_id: &str,
		amount: &str,
		to_address: &str,
		wallet: &WalletConfig,
	) -> Result<Settlement>;

	/// Bridge deposit address for funding the wallet from an external chain.
	async fn deposit_address(
		&self,
		wallet_address: &str,
		token: &Token,
	) -> Result<DepositAddress>;
}

/// Block explorer link for a settlement transaction.
pub fn explorer_link(tx_hash: &str) -> String {
	format!("https://nearblocks.io/txns/{}", tx_hash)
}

/// Base-unit balance held for a token, zero when absent from the list.
pub fn balance_for(balances: &[TokenBalance], intents_token_id: &str) -> U256 {
	balances
		.iter()
		.find(|b| b.token.intents_token_id == intents_token_id)
		.and_then(|b| U256::from_str_radix(&b.balance, 10).ok())
		.unwrap_or(U256::ZERO)
}

/// Fail fast before quoting when the wallet cannot cover the spend. The
/// comparison is base-unit integers only; formatted amounts are display-only.
pub fn ensure_balance(
	balances: &[TokenBalance],
	token: &Token,
	required: U256,
) -> intents_types::Result<()> {
	let available = balance_for(balances, &token.intents_token_id);
	if required > available {
		return Err(intents_types::Error::InsufficientBalance {
			available: intents_types::format_units(available, token.decimals),
			symbol: token.symbol.clone(),
		});
	}
	Ok(())
}

/// Format a base-unit string with the token's decimals, falling back to the
/// raw value when it is not a decimal integer.
pub fn format_base_units(raw: &str, decimals: u8) -> String {
	U256::from_str_radix(raw, 10)
		.map(|v| intents_types::format_units(v, decimals))
		.unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Mutex;

	use super::*;
	use intents_types::Error;

	/// Scripted settlement collaborator that counts calls.
	pub struct FakeSettlement {
		pub quote_response: Mutex<Option<QuoteOutcome<QuoteResponse>>>,
		pub quote_calls: AtomicUsize,
		pub execute_calls: AtomicUsize,
		pub transfer_calls: AtomicUsize,
		pub fail_execute: bool,
	}

	impl FakeSettlement {
		pub fn with_quote(outcome: QuoteOutcome<QuoteResponse>) -> Self {
			Self {
				quote_response: Mutex::new(Some(outcome)),
				quote_calls: AtomicUsize::new(0),
				execute_calls: AtomicUsize::new(0),
				transfer_calls: AtomicUsize::new(0),
				fail_execute: false,
			}
		}

		pub fn empty() -> Self {
			Self::with_quote(QuoteOutcome::Error {
				message: "no quote scripted".to_string(),
			})
		}
	}

	#[async_trait]
	impl SettlementApi for FakeSettlement {
		async fn request_quote(
			&self,
			_request: &QuoteRequest,
		) -> Result<QuoteOutcome<QuoteResponse>> {
			self.quote_calls.fetch_add(1, Ordering::SeqCst);
			let outcome = self.quote_response.lock().unwrap().take();
			outcome.ok_or_else(|| Error::Api("quote already consumed".to_string()))
		}

		async fn execute_quote(
			&self,
			_quote: &QuoteResponse,
			_wallet: &WalletConfig,
		) -> Result<Settlement> {
			self.execute_calls.fetch_add(1, Ordering::SeqCst);
			if self.fail_execute {
				return Err(Error::Api("relay rejected the intent".to_string()));
			}
			Ok(Settlement {
				tx_hash: "FAKE_TX_HASH".to_string(),
			})
		}

		async fn transfer(
			&self,
			_token_id: &str,
			_amount: &str,
			_to_address: &str,
			_wallet: &WalletConfig,
		) -> Result<Settlement> {
			self.transfer_calls.fetch_add(1, Ordering::SeqCst);
			if self.fail_execute {
				return Err(Error::Api("relay rejected the intent".to_string()));
			}
			Ok(Settlement {
				tx_hash: "FAKE_TRANSFER_HASH".to_string(),
			})
		}

		async fn deposit_address(
			&self,
			_wallet_address: &str,
			token: &Token,
		) -> Result<DepositAddress> {
			Ok(DepositAddress {
				address: "0xdeadbeef".to_string(),
				chain: token.blockchain.clone(),
				memo: None,
			})
		}
	}

	pub fn token(symbol: &str, blockchain: &str, decimals: u8) -> Token {
		Token {
			symbol: symbol.to_string(),
			blockchain: blockchain.to_string(),
			intents_token_id: format!("nep141:{}.{}", symbol.to_lowercase(), blockchain),
			near_token_id: format!("{}.{}.omft.near", symbol.to_lowercase(), blockchain),
			asset_identifier: format!("{}:{}", blockchain, symbol.to_lowercase()),
			decimals,
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

	pub fn balance(token: Token, base_units: &str) -> TokenBalance {
		let formatted = intents_types::format_units(
			U256::from_str_radix(base_units, 10).unwrap(),
			token.decimals,
		);
		TokenBalance {
			token,
			balance: base_units.to_string(),
			balance_formatted: formatted,
		}
	}

	pub fn wallet() -> WalletConfig {
		WalletConfig {
			private_key: "ed25519:fake".to_string(),
			wallet_address: "aabbccdd".to_string(),
		}
	}

	/// Fixed in-memory catalog that counts fetches.
	pub struct FakeCatalog {
		pub tokens: Vec<Token>,
		pub fetch_calls: AtomicUsize,
	}

	impl FakeCatalog {
		pub fn new(tokens: Vec<Token>) -> Self {
			Self {
				tokens,
				fetch_calls: AtomicUsize::new(0),
			}
		}
	}

	#[async_trait]
	impl TokenCatalog for FakeCatalog {
		async fn fetch(&self) -> Result<Vec<Token>> {
			self.fetch_calls.fetch_add(1, Ordering::SeqCst);
			Ok(self.tokens.clone())
		}
	}

	/// Fixed in-memory balances, returned for any wallet.
	pub struct FakeOracle {
		pub balances: Vec<TokenBalance>,
	}

	#[async_trait]
	impl BalanceOracle for FakeOracle {
		async fn fetch(&self, _wallet_address: &str) -> Vec<TokenBalance> {
			self.balances.clone()
		}
	}

	pub fn quote_response(amount_in: &str, amount_out: &str) -> QuoteResponse {
		QuoteResponse {
			quote_id: "q-1".to_string(),
			origin_asset: "nep141:usdc.eth".to_string(),
			amount_in: amount_in.to_string(),
			amount_out: amount_out.to_string(),
			deadline: None,
			deposit_address: Some("deposit.near".to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::test_support::*;
	use super::*;

	#[test]
	fn balance_lookup_defaults_to_zero() {
		let t = token("USDC", "eth", 6);
		let balances = vec![balance(t.clone(), "1500000")];
		assert_eq!(
			balance_for(&balances, &t.intents_token_id),
			U256::from(1_500_000u64)
		);
		assert_eq!(balance_for(&balances, "nep141:other"), U256::ZERO);
	}

	#[test]
	fn explorer_link_points_at_the_transaction() {
		assert_eq!(
			explorer_link("8xyz"),
			"https://nearblocks.io/txns/8xyz"
		);
	}
}
