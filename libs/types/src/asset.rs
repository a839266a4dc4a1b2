//! Asset identifiers
//!
//! The ledger tracks a native asset plus arbitrary registered tokens. The
//! native asset is a reserved sentinel variant, so it can never collide
//! with a token identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a fungible asset tracked by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The platform's base transferable unit (reserved sentinel).
    Native,
    /// A registered token, named by an opaque address-like string.
    Token(String),
}

impl AssetId {
    /// Create a token asset identifier.
    pub fn token(id: impl Into<String>) -> Self {
        Self::Token(id.into())
    }

    /// Check whether this is the native sentinel.
    pub fn is_native(&self) -> bool {
        matches!(self, AssetId::Native)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "NATIVE"),
            AssetId::Token(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_is_sentinel() {
        assert!(AssetId::Native.is_native());
        assert!(!AssetId::token("0xdead").is_native());
    }

    #[test]
    fn test_native_never_collides_with_token() {
        // Even a token literally named "NATIVE" is a distinct identifier.
        assert_ne!(AssetId::Native, AssetId::token("NATIVE"));
    }

    #[test]
    fn test_display() {
        assert_eq!(AssetId::Native.to_string(), "NATIVE");
        assert_eq!(AssetId::token("0xdead").to_string(), "0xdead");
    }

    #[test]
    fn test_serialization_round_trip() {
        for asset in [AssetId::Native, AssetId::token("0xbeef")] {
            let json = serde_json::to_string(&asset).unwrap();
            let deserialized: AssetId = serde_json::from_str(&json).unwrap();
            assert_eq!(asset, deserialized);
        }
    }
}
