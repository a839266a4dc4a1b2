//! Accounting and order-book core for a custodial exchange
//!
//! This crate implements the contract layer of the exchange: per-user
//! balances of a native asset and arbitrary registered tokens, deposits
//! and withdrawals with two-phase commit against external asset
//! collaborators, and a standing order book with owner-restricted
//! cancellation. Every successful mutation emits a structured event for
//! external observers.
//!
//! # Modules
//! - `errors`: Error taxonomy for ledger and book operations
//! - `events`: Structured events (Deposit, Withdraw, Order, Cancel)
//! - `token`: External asset collaborator traits and in-memory references
//! - `ledger`: Balance tracking with overflow/underflow safety
//! - `book`: Sequential order ids, order records, cancellation state
//! - `exchange`: Facade wiring ledger, book, and fee configuration

pub mod book;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod ledger;
pub mod token;

pub use exchange::Exchange;

/// Contract version — frozen after release
pub const CONTRACT_VERSION: &str = "1.0.0";
