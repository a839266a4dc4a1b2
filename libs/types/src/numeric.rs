//! Unsigned fixed-point amounts
//!
//! All balances and order amounts are unsigned integers scaled by 10^18,
//! matching the precision of the traded assets. Arithmetic is checked:
//! credits that would overflow and debits past zero are rejected, never
//! wrapped. Decimal strings are parsed through rust_decimal so "1.5"
//! deterministically becomes 1.5·10^18 scaled units.

use rust_decimal::Decimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a decimal string into an [`Amount`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("Invalid decimal literal: {0}")]
    Invalid(String),

    #[error("Amounts are unsigned: negative value rejected")]
    Negative,

    #[error("Too many fractional digits: at most {max} supported", max = Amount::DECIMALS)]
    PrecisionTooHigh,

    #[error("Value exceeds the representable amount range")]
    Overflow,
}

/// Unsigned fixed-point amount scaled by 10^18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u128);

impl Amount {
    /// Number of fractional decimal digits.
    pub const DECIMALS: u32 = 18;

    /// One whole unit (10^18 scaled units).
    pub const ONE: Amount = Amount(1_000_000_000_000_000_000);

    /// The zero amount.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Check whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Create from raw scaled units.
    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Get the raw scaled units.
    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Create from a whole number of units (`units`·10^18).
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * Self::ONE.0)
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction; `None` on underflow past zero.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Convert to a [`Decimal`] in whole units, if representable.
    ///
    /// Decimal carries a 96-bit mantissa, so amounts beyond roughly
    /// 7.9·10^10 whole units return `None`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.0 > i128::MAX as u128 {
            return None;
        }
        Decimal::try_from_i128_with_scale(self.0 as i128, Self::DECIMALS).ok()
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = Decimal::from_str(s).map_err(|_| ParseAmountError::Invalid(s.to_string()))?;
        if d.is_sign_negative() && !d.is_zero() {
            return Err(ParseAmountError::Negative);
        }
        let d = d.normalize();
        if d.scale() > Self::DECIMALS {
            return Err(ParseAmountError::PrecisionTooHigh);
        }
        let mantissa = d.mantissa().unsigned_abs();
        let factor = 10u128.pow(Self::DECIMALS - d.scale());
        mantissa
            .checked_mul(factor)
            .map(Amount)
            .ok_or(ParseAmountError::Overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serialized as a decimal string of raw scaled units. 10^18-scaled
// magnitudes exceed what JSON numbers carry losslessly.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let raw = s.parse::<u128>().map_err(DeError::custom)?;
        Ok(Amount(raw))
    }
}
