//! Money value object in integer minor units.
//!
//! All monetary values are carried as i64 minor units (cents), never
//! floats. Rounding happens in exactly one place: `round_ratio`. Percent
//! discounts round half-up to whole currency units (catalog prices are
//! whole units, so a 20% coupon on 99 quotes 20 off, not 19.80); refund
//! proration via `ratio` rounds half-up to the minor unit. Both
//! calculators go through the same rounding site, so a quoted amount and
//! a re-verified amount can never drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use super::Percentage;

/// Non-negative amount of money in minor units (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units, clamping negatives to zero.
    pub fn from_minor_units(minor: i64) -> Self {
        Self(minor.max(0))
    }

    /// Creates an amount from whole currency units (e.g. 99 -> 99.00).
    pub fn from_units(units: i64) -> Self {
        Self::from_minor_units(units.saturating_mul(100))
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `percentage` of this amount, rounded half-up to whole
    /// currency units and never exceeding the amount itself.
    pub fn percent_of(&self, percentage: Percentage) -> Self {
        if percentage.is_zero() {
            return Self::ZERO;
        }
        let units = round_ratio(self.0, i64::from(percentage.value()), 100 * 100);
        Self::from_minor_units(units.saturating_mul(100)).min(*self)
    }

    /// Computes `self * numerator / denominator`, rounded half-up.
    ///
    /// Returns zero when the denominator is zero or negative; callers
    /// validate day counts before prorating, so that branch is a guard,
    /// not an expected path.
    pub fn ratio(&self, numerator: i64, denominator: i64) -> Self {
        if denominator <= 0 || numerator <= 0 {
            return Self::ZERO;
        }
        Self::from_minor_units(round_ratio(self.0, numerator, denominator))
    }

    /// Subtracts, flooring at zero.
    pub fn saturating_sub(&self, other: Money) -> Self {
        Self((self.0 - other.0).max(0))
    }

    /// Returns the smaller of two amounts.
    pub fn min(self, other: Money) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

/// Rounds `amount * numerator / denominator` half-up.
///
/// Intermediate math runs in i128 so realistic prices cannot overflow.
fn round_ratio(amount: i64, numerator: i64, denominator: i64) -> i64 {
    let num = i128::from(amount) * i128::from(numerator);
    let den = i128::from(denominator);
    let quotient = num / den;
    let remainder = num % den;
    let rounded = if remainder * 2 >= den {
        quotient + 1
    } else {
        quotient
    };
    rounded as i64
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
