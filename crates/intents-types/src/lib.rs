//! Shared data model for the intents CLI
//!
//! This crate holds the types exchanged between the CLI command layer and the
//! external collaborators (token catalog, balance oracle, settlement API),
//! the error taxonomy, and the fixed-point amount conversion utilities.

pub mod amount;
pub mod error;
pub mod quote;
pub mod token;

pub use amount::{format_units, parse_units};
pub use error::{Error, Result};
pub use quote::{
	quote_expires_at, DepositAddress, ExecuteOutcome, QuoteOutcome, QuoteRequest, QuoteResponse,
	RecipientKind, Settlement, SwapQuote, TransferQuote, WithdrawQuote,
};
pub use token::{Token, TokenBalance};
