//! Structured events emitted on successful mutations
//!
//! Events are immutable, append-only records for any observer/indexer to
//! consume. Field names serialize in camelCase to match the published
//! event shape. A rejected call emits nothing.

use serde::{Deserialize, Serialize};
use types::asset::AssetId;
use types::ids::{AccountId, OrderId};
use types::numeric::Amount;
use types::order::Order;

/// Asset credited to a user's ledger balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositEvent {
    pub asset: AssetId,
    pub user: AccountId,
    pub amount: Amount,
    /// Balance after the credit.
    pub balance: Amount,
}

/// Asset debited from a user's ledger balance and pushed out of custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawEvent {
    pub asset: AssetId,
    pub user: AccountId,
    pub amount: Amount,
    /// Balance after the debit.
    pub balance: Amount,
}

/// Standing order listed on the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub id: OrderId,
    pub user: AccountId,
    pub token_get: AssetId,
    pub amount_get: Amount,
    pub token_give: AssetId,
    pub amount_give: Amount,
    /// Creation time, Unix seconds.
    pub timestamp: i64,
}

impl OrderEvent {
    /// Build the event for a freshly placed order.
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id,
            user: order.user.clone(),
            token_get: order.token_get.clone(),
            amount_get: order.amount_get,
            token_give: order.token_give.clone(),
            amount_give: order.amount_give,
            timestamp: order.timestamp,
        }
    }
}

/// Standing order cancelled by its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelEvent {
    pub id: OrderId,
    pub user: AccountId,
    pub token_get: AssetId,
    pub amount_get: Amount,
    pub token_give: AssetId,
    pub amount_give: Amount,
    /// Cancellation time, Unix seconds.
    pub timestamp: i64,
}

impl CancelEvent {
    /// Build the event for a cancelled order at the given time.
    pub fn from_order(order: &Order, cancelled_at: i64) -> Self {
        Self {
            id: order.id,
            user: order.user.clone(),
            token_get: order.token_get.clone(),
            amount_get: order.amount_get,
            token_give: order.token_give.clone(),
            amount_give: order.amount_give,
            timestamp: cancelled_at,
        }
    }
}

/// Enum wrapper for all exchange events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    Deposit(DepositEvent),
    Withdraw(WithdrawEvent),
    Order(OrderEvent),
    Cancel(CancelEvent),
}
