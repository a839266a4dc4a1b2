//! OrderBook — sequential order ids, order records, cancellation state
//!
//! Orders are listed without a balance-sufficiency check; the book only
//! assigns ids, stores immutable records, and tracks per-order
//! cancellation. Records are retained forever for audit — cancellation
//! sets a flag, it never deletes. Ids start at 1 and increase by exactly
//! one per placed order, regardless of intervening cancellations.

use std::collections::{BTreeMap, HashSet};
use types::asset::AssetId;
use types::ids::{AccountId, OrderId};
use types::numeric::Amount;
use types::order::Order;

use crate::errors::BookError;
use crate::events::{CancelEvent, ExchangeEvent, OrderEvent};

/// Standing order book.
///
/// An order is `Open` on placement and moves to `Cancelled` (terminal)
/// only by a successful cancel from its owner. No other transitions exist.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// All orders ever placed, by id (append-only)
    orders: BTreeMap<OrderId, Order>,
    /// Ids whose cancellation flag is set; once set, never cleared
    cancelled: HashSet<OrderId>,
    /// Last assigned id; the next order gets `last_id + 1`
    last_id: u64,
    /// Emitted events log (append-only)
    events: Vec<ExchangeEvent>,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// List a standing order and assign it the next sequential id.
    ///
    /// Never fails for well-formed identities and asset identifiers; no
    /// balance check is performed at listing time.
    pub fn place(
        &mut self,
        user: AccountId,
        token_get: AssetId,
        amount_get: Amount,
        token_give: AssetId,
        amount_give: Amount,
        timestamp: i64,
    ) -> OrderId {
        self.last_id += 1;
        let id = OrderId::new(self.last_id);
        let order = Order::new(
            id, user, token_get, amount_get, token_give, amount_give, timestamp,
        );
        self.events
            .push(ExchangeEvent::Order(OrderEvent::from_order(&order)));
        self.orders.insert(id, order);
        id
    }

    /// Cancel an order. Restricted to the order's original owner.
    ///
    /// Fails with `OrderNotFound` for an unknown id and `Unauthorized`
    /// when `caller` is not the owner. Cancelling an already-cancelled
    /// order by its owner is a no-op: the flag stays true and no second
    /// event is emitted.
    pub fn cancel(
        &mut self,
        order_id: OrderId,
        caller: &AccountId,
        timestamp: i64,
    ) -> Result<(), BookError> {
        let order = self
            .orders
            .get(&order_id)
            .ok_or(BookError::OrderNotFound { order_id })?;

        if order.user != *caller {
            return Err(BookError::Unauthorized);
        }

        if !self.cancelled.insert(order_id) {
            return Ok(());
        }

        self.events
            .push(ExchangeEvent::Cancel(CancelEvent::from_order(order, timestamp)));
        Ok(())
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Whether the cancellation flag is set for `order_id`.
    pub fn is_cancelled(&self, order_id: OrderId) -> bool {
        self.cancelled.contains(&order_id)
    }

    /// Look up an order record by id.
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Total number of orders ever placed.
    pub fn order_count(&self) -> u64 {
        self.last_id
    }

    /// Iterate all order records in id order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_sample(book: &mut OrderBook, user: &str) -> OrderId {
        book.place(
            AccountId::new(user),
            AssetId::token("0xdead"),
            Amount::from_units(1),
            AssetId::Native,
            Amount::from_units(1),
            1_700_000_000,
        )
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut book = OrderBook::new();
        assert_eq!(place_sample(&mut book, "alice"), OrderId::new(1));
        assert_eq!(place_sample(&mut book, "bob"), OrderId::new(2));
        assert_eq!(place_sample(&mut book, "alice"), OrderId::new(3));
        assert_eq!(book.order_count(), 3);
    }

    #[test]
    fn test_ids_not_reused_after_cancellation() {
        let mut book = OrderBook::new();
        let first = place_sample(&mut book, "alice");
        book.cancel(first, &AccountId::new("alice"), 1_700_000_100)
            .unwrap();
        // Next id still advances past the cancelled one
        assert_eq!(place_sample(&mut book, "alice"), OrderId::new(2));
    }

    #[test]
    fn test_order_record_stored() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");

        let order = book.order(id).unwrap();
        assert_eq!(order.user, AccountId::new("alice"));
        assert_eq!(order.amount_get, Amount::from_units(1));
        assert!(order.token_give.is_native());
        assert_eq!(order.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_place_emits_order_event() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");

        let events = book.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ExchangeEvent::Order(e) => {
                assert_eq!(e.id, id);
                assert_eq!(e.user, AccountId::new("alice"));
                assert_eq!(e.timestamp, 1_700_000_000);
            }
            other => panic!("expected Order event, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_by_owner_sets_flag() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");
        assert!(!book.is_cancelled(id));

        book.cancel(id, &AccountId::new("alice"), 1_700_000_100)
            .unwrap();
        assert!(book.is_cancelled(id));
        // Record retained for audit
        assert!(book.order(id).is_some());
    }

    #[test]
    fn test_cancel_emits_cancel_event_with_cancellation_time() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");
        book.cancel(id, &AccountId::new("alice"), 1_700_000_100)
            .unwrap();

        match &book.events()[1] {
            ExchangeEvent::Cancel(e) => {
                assert_eq!(e.id, id);
                assert_eq!(e.timestamp, 1_700_000_100);
                assert_eq!(e.amount_give, Amount::from_units(1));
            }
            other => panic!("expected Cancel event, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_by_non_owner_rejected() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");

        let result = book.cancel(id, &AccountId::new("mallory"), 1_700_000_100);
        assert_eq!(result, Err(BookError::Unauthorized));
        // Flag remains false, no Cancel event
        assert!(!book.is_cancelled(id));
        assert_eq!(book.events().len(), 1);
    }

    #[test]
    fn test_cancel_unknown_id_rejected() {
        let mut book = OrderBook::new();
        let result = book.cancel(OrderId::new(42), &AccountId::new("alice"), 1_700_000_100);
        assert_eq!(
            result,
            Err(BookError::OrderNotFound {
                order_id: OrderId::new(42)
            })
        );
    }

    #[test]
    fn test_double_cancel_is_noop() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");
        let alice = AccountId::new("alice");

        book.cancel(id, &alice, 1_700_000_100).unwrap();
        book.cancel(id, &alice, 1_700_000_200).unwrap();

        assert!(book.is_cancelled(id));
        // Exactly one Cancel event despite two calls
        let cancels = book
            .events()
            .iter()
            .filter(|e| matches!(e, ExchangeEvent::Cancel(_)))
            .count();
        assert_eq!(cancels, 1);
    }

    #[test]
    fn test_double_cancel_by_non_owner_still_rejected() {
        let mut book = OrderBook::new();
        let id = place_sample(&mut book, "alice");
        book.cancel(id, &AccountId::new("alice"), 1_700_000_100)
            .unwrap();

        // Even after cancellation, a non-owner gets Unauthorized
        let result = book.cancel(id, &AccountId::new("mallory"), 1_700_000_200);
        assert_eq!(result, Err(BookError::Unauthorized));
    }

    #[test]
    fn test_orders_iterate_in_id_order() {
        let mut book = OrderBook::new();
        place_sample(&mut book, "alice");
        place_sample(&mut book, "bob");
        place_sample(&mut book, "carol");

        let ids: Vec<u64> = book.orders().map(|o| o.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_drain_events() {
        let mut book = OrderBook::new();
        place_sample(&mut book, "alice");
        let events = book.drain_events();
        assert_eq!(events.len(), 1);
        assert!(book.events().is_empty());
    }
}
