//! Refund policy knobs.
//!
//! The statutory constants behind cancellation refunds. Deployments may
//! override them through configuration; the defaults match the platform's
//! current jurisdiction: 5% cancellation fee capped at 100 currency
//! units, and refunds below 2 units are not issued.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, Percentage};

/// Cancellation refund policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundPolicy {
    /// Cancellation fee as a percentage of the original amount.
    pub fee_percent: Percentage,

    /// Upper bound on the cancellation fee.
    pub fee_cap: Money,

    /// Refunds below this amount are treated as zero.
    pub minimum_refund: Money,
}

impl RefundPolicy {
    /// Creates a policy from explicit knobs.
    pub fn new(fee_percent: Percentage, fee_cap: Money, minimum_refund: Money) -> Self {
        Self {
            fee_percent,
            fee_cap,
            minimum_refund,
        }
    }

    /// Cancellation fee for a given original amount.
    pub fn fee_for(&self, original_amount: Money) -> Money {
        original_amount.percent_of(self.fee_percent).min(self.fee_cap)
    }
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self {
            fee_percent: Percentage::new(5),
            fee_cap: Money::from_units(100),
            minimum_refund: Money::from_units(2),
        }
    }
}
