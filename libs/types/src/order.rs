//! Standing order records
//!
//! An order is a non-escrowed declaration of willingness to exchange one
//! asset amount for another. Records are immutable after creation and are
//! retained for audit; cancellation is tracked separately by the book.

use crate::asset::AssetId;
use crate::ids::{AccountId, OrderId};
use crate::numeric::Amount;
use serde::{Deserialize, Serialize};

/// A standing trade order.
///
/// Field names serialize in camelCase (`tokenGet`, `amountGive`, ...) to
/// match the external event shape consumed by observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user: AccountId,
    pub token_get: AssetId,
    pub amount_get: Amount,
    pub token_give: AssetId,
    pub amount_give: Amount,
    /// Creation time, Unix seconds.
    pub timestamp: i64,
}

impl Order {
    /// Create a new order record.
    pub fn new(
        id: OrderId,
        user: AccountId,
        token_get: AssetId,
        amount_get: Amount,
        token_give: AssetId,
        amount_give: Amount,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            user,
            token_get,
            amount_get,
            token_give,
            amount_give,
            timestamp,
        }
    }
}
