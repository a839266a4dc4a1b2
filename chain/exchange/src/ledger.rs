//! AssetLedger — per-user balance tracking for the native asset and tokens
//!
//! Maps (asset, owner) to an unsigned fixed-point balance. Balances are
//! created implicitly at zero on first reference, mutated only by deposit
//! and withdraw, and never deleted. External asset movement follows a
//! two-phase discipline: pull-then-credit on deposit and debit-then-push
//! on withdraw, with compensating rollback so a failing call leaves no
//! intermediate state observable.

use std::collections::HashMap;
use types::asset::AssetId;
use types::ids::AccountId;
use types::numeric::Amount;

use crate::errors::LedgerError;
use crate::events::{DepositEvent, ExchangeEvent, WithdrawEvent};
use crate::token::{NativeTransfer, TokenContract};

/// Custodial balance ledger.
///
/// Balances are stored as `HashMap<AssetId, HashMap<AccountId, Amount>>`.
/// The `custody` identity is the exchange itself: the `to` of token pulls
/// and the `from` of token pushes.
#[derive(Debug)]
pub struct AssetLedger {
    /// Balances: asset -> (owner -> amount)
    balances: HashMap<AssetId, HashMap<AccountId, Amount>>,
    /// The exchange's own identity on external collaborators
    custody: AccountId,
    /// Emitted events log (append-only)
    events: Vec<ExchangeEvent>,
}

impl AssetLedger {
    /// Create an empty ledger with the exchange's custody identity.
    pub fn new(custody: AccountId) -> Self {
        Self {
            balances: HashMap::new(),
            custody,
            events: Vec::new(),
        }
    }

    /// The custody identity used on external collaborators.
    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    // ───────────────────────── Native asset ─────────────────────────

    /// Credit native units attached to the call.
    ///
    /// A zero amount is valid and simply credits nothing. The only failure
    /// path is arithmetic overflow on the credit.
    pub fn deposit_native(
        &mut self,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<DepositEvent, LedgerError> {
        let balance = self.credit(&AssetId::Native, owner, amount)?;
        Ok(self.emit_deposit(AssetId::Native, owner, amount, balance))
    }

    /// Debit native units and push them back to `owner`.
    ///
    /// Fails with `InsufficientBalance` when the tracked balance is below
    /// `amount`, and with `TransferFailed` when the external push does not
    /// succeed — in which case the debit is rolled back.
    pub fn withdraw_native(
        &mut self,
        native: &mut dyn NativeTransfer,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<WithdrawEvent, LedgerError> {
        let balance = self.debit(&AssetId::Native, owner, amount)?;
        if !native.transfer(owner, amount) {
            // Roll back the debit; the credit cannot overflow because the
            // balance was just this much higher.
            self.credit(&AssetId::Native, owner, amount)?;
            return Err(LedgerError::TransferFailed {
                reason: format!("native push to {} rejected", owner),
            });
        }
        Ok(self.emit_withdraw(AssetId::Native, owner, amount, balance))
    }

    // ───────────────────────── Token assets ─────────────────────────

    /// Pull `amount` of a token from `owner` into custody and credit it.
    ///
    /// The native sentinel must use the native path. The credit is
    /// overflow-checked before the pull so a successful pull always
    /// commits; a failed pull leaves the ledger untouched.
    pub fn deposit_token(
        &mut self,
        token: &mut dyn TokenContract,
        asset: &AssetId,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<DepositEvent, LedgerError> {
        self.reject_native(asset)?;

        let new_balance = self
            .balance_of(asset, owner)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let custody = self.custody.clone();
        if !token.transfer_from(&custody, owner, &custody, amount) {
            return Err(LedgerError::TransferFailed {
                reason: format!("token pull from {} failed for {}", owner, asset),
            });
        }

        self.set_balance(asset, owner, new_balance);
        Ok(self.emit_deposit(asset.clone(), owner, amount, new_balance))
    }

    /// Debit `amount` of a token and push it out of custody to `owner`.
    ///
    /// Symmetric with deposit: the native sentinel is rejected, the debit
    /// is rolled back if the external push fails.
    pub fn withdraw_token(
        &mut self,
        token: &mut dyn TokenContract,
        asset: &AssetId,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<WithdrawEvent, LedgerError> {
        self.reject_native(asset)?;

        let balance = self.debit(asset, owner, amount)?;
        let custody = self.custody.clone();
        if !token.transfer(&custody, owner, amount) {
            self.credit(asset, owner, amount)?;
            return Err(LedgerError::TransferFailed {
                reason: format!("token push to {} failed for {}", owner, asset),
            });
        }
        Ok(self.emit_withdraw(asset.clone(), owner, amount, balance))
    }

    // ───────────────────────── Balance queries ─────────────────────────

    /// Get the tracked balance for (asset, owner). Never fails; untouched
    /// entries read as zero.
    pub fn balance_of(&self, asset: &AssetId, owner: &AccountId) -> Amount {
        self.balances
            .get(asset)
            .and_then(|owners| owners.get(owner))
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    // ───────────────────────── Internal arithmetic ─────────────────────────

    /// Credit with overflow protection. Returns the new balance.
    fn credit(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let new_balance = self
            .balance_of(asset, owner)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_balance(asset, owner, new_balance);
        Ok(new_balance)
    }

    /// Debit with underflow protection. Returns the new balance.
    fn debit(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let current = self.balance_of(asset, owner);
        let new_balance = current
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                asset: asset.to_string(),
                required: amount.to_string(),
                available: current.to_string(),
            })?;
        self.set_balance(asset, owner, new_balance);
        Ok(new_balance)
    }

    fn set_balance(&mut self, asset: &AssetId, owner: &AccountId, balance: Amount) {
        self.balances
            .entry(asset.clone())
            .or_default()
            .insert(owner.clone(), balance);
    }

    fn reject_native(&self, asset: &AssetId) -> Result<(), LedgerError> {
        if asset.is_native() {
            return Err(LedgerError::InvalidAsset {
                asset: asset.to_string(),
            });
        }
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_deposit(
        &mut self,
        asset: AssetId,
        owner: &AccountId,
        amount: Amount,
        balance: Amount,
    ) -> DepositEvent {
        let event = DepositEvent {
            asset,
            user: owner.clone(),
            amount,
            balance,
        };
        self.events.push(ExchangeEvent::Deposit(event.clone()));
        event
    }

    fn emit_withdraw(
        &mut self,
        asset: AssetId,
        owner: &AccountId,
        amount: Amount,
        balance: Amount,
    ) -> WithdrawEvent {
        let event = WithdrawEvent {
            asset,
            user: owner.clone(),
            amount,
            balance,
        };
        self.events.push(ExchangeEvent::Withdraw(event.clone()));
        event
    }
}
