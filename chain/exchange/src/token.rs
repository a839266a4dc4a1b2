//! External asset collaborator seam
//!
//! The exchange core never moves token or native units itself; it asks an
//! external collaborator and checks the result of every call. Identities
//! are passed explicitly — there is no ambient caller.
//!
//! [`InMemoryToken`] and [`InMemoryNative`] are reference collaborators
//! with the standard transfer/approve semantics, used by tests and demos.

use std::collections::{HashMap, HashSet};
use types::ids::AccountId;
use types::numeric::Amount;

/// Fungible token collaborator interface.
///
/// Mirrors the standard token contract surface: a pull authorized by a
/// prior allowance, a push of the holder's own funds, and a balance read.
/// Transfer methods report success; the core treats `false` as a failed
/// external movement and rolls back.
pub trait TokenContract {
    /// Pull `amount` from `from` into `to`, spending an allowance that
    /// `from` previously granted to `spender`. Returns `false` when the
    /// allowance or source balance is insufficient.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> bool;

    /// Move `amount` of `from`'s own funds to `to`. Returns `false` when
    /// the source balance is insufficient or the recipient rejects.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> bool;

    /// Balance held by `owner` on this token.
    fn balance_of(&self, owner: &AccountId) -> Amount;
}

/// Native asset push collaborator.
///
/// Native deposits carry their value with the call, so only the outbound
/// push is delegated. A push may fail (e.g. the recipient rejects funds).
pub trait NativeTransfer {
    /// Push `amount` of the native asset out of custody to `to`.
    fn transfer(&mut self, to: &AccountId, amount: Amount) -> bool;
}

/// In-memory token with fixed supply, balances, and allowances.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToken {
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl InMemoryToken {
    /// Create a token with `supply` minted to `deployer`.
    pub fn new(deployer: &AccountId, supply: Amount) -> Self {
        let mut balances = HashMap::new();
        balances.insert(deployer.clone(), supply);
        Self {
            balances,
            allowances: HashMap::new(),
        }
    }

    /// Grant `spender` an allowance over `owner`'s funds.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    /// Remaining allowance granted by `owner` to `spender`.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    fn move_balance(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> bool {
        let from_balance = self.balance_of(from);
        let Some(new_from) = from_balance.checked_sub(amount) else {
            return false;
        };
        let Some(new_to) = self.balance_of(to).checked_add(amount) else {
            return false;
        };
        self.balances.insert(from.clone(), new_from);
        self.balances.insert(to.clone(), new_to);
        true
    }
}

impl TokenContract for InMemoryToken {
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> bool {
        let allowance = self.allowance(from, spender);
        let Some(remaining) = allowance.checked_sub(amount) else {
            return false;
        };
        if !self.move_balance(from, to, amount) {
            return false;
        }
        self.allowances
            .insert((from.clone(), spender.clone()), remaining);
        true
    }

    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> bool {
        self.move_balance(from, to, amount)
    }

    fn balance_of(&self, owner: &AccountId) -> Amount {
        self.balances
            .get(owner)
            .copied()
            .unwrap_or_else(Amount::zero)
    }
}

/// In-memory native push collaborator.
///
/// Records delivered amounts per recipient; accounts marked rejecting
/// refuse every push, exercising the core's rollback path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNative {
    received: HashMap<AccountId, Amount>,
    rejecting: HashSet<AccountId>,
}

impl InMemoryNative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account as rejecting all native pushes.
    pub fn set_rejecting(&mut self, account: &AccountId) {
        self.rejecting.insert(account.clone());
    }

    /// Total native units delivered to `account`.
    pub fn received_by(&self, account: &AccountId) -> Amount {
        self.received
            .get(account)
            .copied()
            .unwrap_or_else(Amount::zero)
    }
}

impl NativeTransfer for InMemoryNative {
    fn transfer(&mut self, to: &AccountId, amount: Amount) -> bool {
        if self.rejecting.contains(to) {
            return false;
        }
        let current = self.received_by(to);
        let Some(new_total) = current.checked_add(amount) else {
            return false;
        };
        self.received.insert(to.clone(), new_total);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> (AccountId, AccountId, AccountId) {
        (
            AccountId::new("deployer"),
            AccountId::new("user1"),
            AccountId::new("exchange"),
        )
    }

    #[test]
    fn test_token_supply_minted_to_deployer() {
        let (deployer, user, _) = accounts();
        let token = InMemoryToken::new(&deployer, Amount::from_units(1_000_000));
        assert_eq!(token.balance_of(&deployer), Amount::from_units(1_000_000));
        assert_eq!(token.balance_of(&user), Amount::zero());
    }

    #[test]
    fn test_token_transfer() {
        let (deployer, user, _) = accounts();
        let mut token = InMemoryToken::new(&deployer, Amount::from_units(100));
        assert!(token.transfer(&deployer, &user, Amount::from_units(30)));
        assert_eq!(token.balance_of(&deployer), Amount::from_units(70));
        assert_eq!(token.balance_of(&user), Amount::from_units(30));
    }

    #[test]
    fn test_token_transfer_insufficient_balance() {
        let (deployer, user, _) = accounts();
        let mut token = InMemoryToken::new(&deployer, Amount::from_units(1));
        assert!(!token.transfer(&deployer, &user, Amount::from_units(2)));
        // Balances untouched on failure
        assert_eq!(token.balance_of(&deployer), Amount::from_units(1));
        assert_eq!(token.balance_of(&user), Amount::zero());
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let (deployer, user, exchange) = accounts();
        let mut token = InMemoryToken::new(&deployer, Amount::from_units(100));
        token.transfer(&deployer, &user, Amount::from_units(10));

        // No approval yet
        assert!(!token.transfer_from(&exchange, &user, &exchange, Amount::from_units(5)));

        token.approve(&user, &exchange, Amount::from_units(5));
        assert!(token.transfer_from(&exchange, &user, &exchange, Amount::from_units(5)));
        assert_eq!(token.balance_of(&exchange), Amount::from_units(5));
        assert_eq!(token.allowance(&user, &exchange), Amount::zero());
    }

    #[test]
    fn test_transfer_from_exceeding_allowance() {
        let (deployer, user, exchange) = accounts();
        let mut token = InMemoryToken::new(&deployer, Amount::from_units(100));
        token.transfer(&deployer, &user, Amount::from_units(10));
        token.approve(&user, &exchange, Amount::from_units(3));

        assert!(!token.transfer_from(&exchange, &user, &exchange, Amount::from_units(4)));
        // Allowance untouched on failure
        assert_eq!(token.allowance(&user, &exchange), Amount::from_units(3));
    }

    #[test]
    fn test_native_records_pushes() {
        let (_, user, _) = accounts();
        let mut native = InMemoryNative::new();
        assert!(native.transfer(&user, Amount::from_units(2)));
        assert!(native.transfer(&user, Amount::from_units(3)));
        assert_eq!(native.received_by(&user), Amount::from_units(5));
    }

    #[test]
    fn test_native_rejecting_account() {
        let (_, user, _) = accounts();
        let mut native = InMemoryNative::new();
        native.set_rejecting(&user);
        assert!(!native.transfer(&user, Amount::from_units(1)));
        assert_eq!(native.received_by(&user), Amount::zero());
    }
}
