//! Unique identifier types for exchange entities
//!
//! Caller identities are opaque address-like strings supplied by the
//! authentication substrate; every mutating operation receives the acting
//! identity explicitly rather than reading it from ambient state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated identity of an account (owner, caller, fee account).
///
/// The platform guarantees a tamper-proof caller identity per call; this
/// type only carries it. Two identities are equal iff their underlying
/// strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an AccountId from an address-like string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for an order.
///
/// Assigned sequentially starting at 1, strictly increasing, never reused
/// even after cancellation. Stable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from its numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
