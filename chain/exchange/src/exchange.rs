//! Exchange facade — wires the ledger, the book, and fee configuration
//!
//! A caller invokes one of the deposit/withdraw/order operations with an
//! authenticated identity; the ledger is consulted or mutated first, then
//! the book records order state. Calls execute to completion one at a
//! time — the exclusive borrow on `&mut self` is the serialization
//! boundary, and a failing call commits nothing.

use std::collections::HashMap;
use tracing::{info, warn};
use types::asset::AssetId;
use types::ids::{AccountId, OrderId};
use types::numeric::Amount;
use types::order::Order;

use crate::book::OrderBook;
use crate::errors::{ExchangeError, LedgerError};
use crate::events::{DepositEvent, WithdrawEvent};
use crate::ledger::AssetLedger;
use crate::token::{NativeTransfer, TokenContract};

/// Custodial exchange core.
///
/// The fee account and fee percent are fixed at construction and never
/// mutated; no deduction point is exercised by this core, so they are
/// carried as inert configuration for the settlement layer.
pub struct Exchange {
    fee_account: AccountId,
    /// Basis-points-like integer scale; inert until settlement defines
    /// where fees apply.
    fee_percent: u32,
    ledger: AssetLedger,
    book: OrderBook,
    /// Registered token collaborators by asset
    tokens: HashMap<AssetId, Box<dyn TokenContract>>,
    /// Native asset push collaborator
    native: Box<dyn NativeTransfer>,
}

impl Exchange {
    /// Create an exchange.
    ///
    /// `custody` is the exchange's own identity on external collaborators;
    /// `native` is the push path for native withdrawals.
    pub fn new(
        custody: AccountId,
        fee_account: AccountId,
        fee_percent: u32,
        native: Box<dyn NativeTransfer>,
    ) -> Self {
        Self {
            fee_account,
            fee_percent,
            ledger: AssetLedger::new(custody),
            book: OrderBook::new(),
            tokens: HashMap::new(),
            native,
        }
    }

    // ───────────────────────── Configuration ─────────────────────────

    /// The configured fee account.
    pub fn fee_account(&self) -> &AccountId {
        &self.fee_account
    }

    /// The configured fee percent.
    pub fn fee_percent(&self) -> u32 {
        self.fee_percent
    }

    /// Register the collaborator contract for a token asset.
    ///
    /// The native sentinel cannot be registered; it has its own path.
    pub fn register_token(
        &mut self,
        asset: AssetId,
        contract: Box<dyn TokenContract>,
    ) -> Result<(), ExchangeError> {
        if asset.is_native() {
            return Err(LedgerError::InvalidAsset {
                asset: asset.to_string(),
            }
            .into());
        }
        info!(asset = %asset, "token registered");
        self.tokens.insert(asset, contract);
        Ok(())
    }

    /// The registered collaborator for an asset, if any.
    pub fn token(&self, asset: &AssetId) -> Option<&dyn TokenContract> {
        self.tokens.get(asset).map(|t| t.as_ref())
    }

    // ───────────────────────── Deposits / withdrawals ─────────────────────────

    /// Credit native units attached to the call.
    pub fn deposit_native(
        &mut self,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<DepositEvent, ExchangeError> {
        let event = self.ledger.deposit_native(owner, amount)?;
        info!(user = %owner, amount = %amount, "native deposit");
        Ok(event)
    }

    /// Debit native units and push them back to `owner`.
    pub fn withdraw_native(
        &mut self,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<WithdrawEvent, ExchangeError> {
        let event = self
            .ledger
            .withdraw_native(self.native.as_mut(), owner, amount)
            .map_err(|e| {
                warn!(user = %owner, amount = %amount, error = %e, "native withdraw rejected");
                e
            })?;
        info!(user = %owner, amount = %amount, "native withdraw");
        Ok(event)
    }

    /// Pull a token from `owner` into custody and credit the ledger.
    pub fn deposit_token(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<DepositEvent, ExchangeError> {
        let token = Self::lookup_token(&mut self.tokens, asset)?;
        let event = self.ledger.deposit_token(token, asset, owner, amount)?;
        info!(asset = %asset, user = %owner, amount = %amount, "token deposit");
        Ok(event)
    }

    /// Debit the ledger and push a token out of custody to `owner`.
    pub fn withdraw_token(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<WithdrawEvent, ExchangeError> {
        let token = Self::lookup_token(&mut self.tokens, asset)?;
        let event = self.ledger.withdraw_token(token, asset, owner, amount)?;
        info!(asset = %asset, user = %owner, amount = %amount, "token withdraw");
        Ok(event)
    }

    /// Tracked balance for (asset, owner). Pure read.
    pub fn balance_of(&self, asset: &AssetId, owner: &AccountId) -> Amount {
        self.ledger.balance_of(asset, owner)
    }

    // ───────────────────────── Orders ─────────────────────────

    /// List a standing order; assigns and returns the next sequential id.
    ///
    /// No balance-sufficiency check is performed at listing time — an
    /// order may be listed speculatively.
    pub fn place_order(
        &mut self,
        owner: &AccountId,
        token_get: AssetId,
        amount_get: Amount,
        token_give: AssetId,
        amount_give: Amount,
    ) -> OrderId {
        let id = self.book.place(
            owner.clone(),
            token_get,
            amount_get,
            token_give,
            amount_give,
            Self::now(),
        );
        info!(order_id = %id, user = %owner, "order placed");
        id
    }

    /// Cancel a standing order. Restricted to the order's owner; does not
    /// affect ledger balances.
    pub fn cancel_order(&mut self, order_id: OrderId, caller: &AccountId) -> Result<(), ExchangeError> {
        self.book.cancel(order_id, caller, Self::now()).map_err(|e| {
            warn!(order_id = %order_id, caller = %caller, error = %e, "cancel rejected");
            e
        })?;
        info!(order_id = %order_id, user = %caller, "order cancelled");
        Ok(())
    }

    /// Whether the cancellation flag is set for `order_id`. Pure read.
    pub fn order_cancelled(&self, order_id: OrderId) -> bool {
        self.book.is_cancelled(order_id)
    }

    /// Look up an order record. Pure read.
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.book.order(order_id)
    }

    /// Total number of orders ever placed. Pure read.
    pub fn order_count(&self) -> u64 {
        self.book.order_count()
    }

    // ───────────────────────── Components ─────────────────────────

    /// The balance ledger, for event inspection.
    pub fn ledger(&self) -> &AssetLedger {
        &self.ledger
    }

    /// The order book, for event inspection.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    // ───────────────────────── Internal ─────────────────────────

    /// Borrows only the registry so the ledger stays available to the caller.
    fn lookup_token<'a>(
        tokens: &'a mut HashMap<AssetId, Box<dyn TokenContract>>,
        asset: &AssetId,
    ) -> Result<&'a mut (dyn TokenContract + 'static), ExchangeError> {
        if asset.is_native() {
            return Err(LedgerError::InvalidAsset {
                asset: asset.to_string(),
            }
            .into());
        }
        tokens.get_mut(asset).map(|t| t.as_mut()).ok_or_else(|| {
            LedgerError::TransferFailed {
                reason: format!("no collaborator registered for {}", asset),
            }
            .into()
        })
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}
