//! Monetary amounts in whole currency units.
//!
//! The storefront prices everything in whole rubles, so amounts are plain
//! unsigned integers. Arithmetic saturates instead of wrapping; a cart that
//! overflows `u64` is not a realistic input.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// An amount of money in whole currency units (rubles).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero rubles.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole units.
    #[must_use]
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// Get the amount in whole units.
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Add two amounts.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.0)
    }
}

impl From<u64> for Money {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_quantity() {
        assert_eq!(Money::new(350).times(2), Money::new(700));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::new(350), Money::new(500), Money::new(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(1100));
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        assert_eq!(Money::new(u64::MAX).plus(Money::new(1)), Money::new(u64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(700).to_string(), "700 ₽");
    }
}
