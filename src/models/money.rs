//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Balances in this crate only ever accumulate, so the type provides
//! addition and even division but deliberately no subtraction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
///
/// Manual split validation requires exact equality between the entered
/// amounts and the expense total, which integer cents make reliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use split_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Split this amount evenly across `n` shares.
    ///
    /// Cents don't always divide evenly, so any remainder is distributed one
    /// cent at a time to the earliest shares. The returned shares always sum
    /// to exactly `self`.
    ///
    /// # Examples
    /// ```
    /// use split_ledger::models::Money;
    /// let shares = Money::from_cents(100).split_even(3);
    /// assert_eq!(shares, vec![
    ///     Money::from_cents(34),
    ///     Money::from_cents(33),
    ///     Money::from_cents(33),
    /// ]);
    /// ```
    ///
    /// # Panics
    /// Panics if `n` is zero. Callers validate a non-empty selection first.
    pub fn split_even(&self, n: usize) -> Vec<Money> {
        assert!(n > 0, "cannot split an amount across zero shares");
        let n = n as i64;
        let base = self.0.div_euclid(n);
        let remainder = self.0.rem_euclid(n);

        (0..n)
            .map(|i| {
                if i < remainder {
                    Self(base + 1)
                } else {
                    Self(base)
                }
            })
            .collect()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
