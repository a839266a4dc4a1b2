//! Error taxonomy for ledger and order-book operations
//!
//! All errors are synchronous and abort the entire call: a rejected call
//! leaves every balance and order record exactly as it was and emits no
//! event. Retry policy, if any, belongs to the caller.

use thiserror::Error;
use types::ids::OrderId;

/// Ledger-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid asset for this operation: {asset}")]
    InvalidAsset { asset: String },

    #[error("Insufficient balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: String,
        available: String,
    },

    #[error("External transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Order-book-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    #[error("Unauthorized: caller is not the order owner")]
    Unauthorized,
}

/// Top-level exchange error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Book error: {0}")]
    Book(#[from] BookError),
}
