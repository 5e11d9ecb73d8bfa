//! Discount rules and the pure discount calculator.
//!
//! This is the only place discount money math happens. The validation
//! path and any later re-verification path both call [`compute_discount`]
//! so the quoted amount and the charged amount can never disagree.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, Percentage, ValidationError};

use super::CouponError;

/// The two supported discount kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percent of the plan price.
    Percent,
    /// Fixed amount off the plan price.
    FixedAmount,
}

/// A discount rule: kind plus magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountRule {
    /// Percent-of-price discount. Magnitude is in (0, 100].
    Percent { percent: Percentage },
    /// Fixed-amount discount, capped at the plan price when applied.
    FixedAmount { amount: Money },
}

impl DiscountRule {
    /// Creates a percent rule, rejecting 0% and values over 100%.
    pub fn percent(value: u8) -> Result<Self, ValidationError> {
        if value == 0 || value > 100 {
            return Err(ValidationError::out_of_range(
                "discount_percent",
                1,
                100,
                i64::from(value),
            ));
        }
        Ok(DiscountRule::Percent {
            percent: Percentage::new(value),
        })
    }

    /// Creates a fixed-amount rule, rejecting a zero magnitude.
    pub fn fixed(amount: Money) -> Result<Self, ValidationError> {
        if amount.is_zero() {
            return Err(ValidationError::out_of_range(
                "discount_amount",
                1,
                i64::MAX,
                0,
            ));
        }
        Ok(DiscountRule::FixedAmount { amount })
    }

    /// Returns the kind of this rule.
    pub fn kind(&self) -> DiscountKind {
        match self {
            DiscountRule::Percent { .. } => DiscountKind::Percent,
            DiscountRule::FixedAmount { .. } => DiscountKind::FixedAmount,
        }
    }
}

/// Result of applying a discount rule to a plan price.
///
/// # Invariants
///
/// - `final_amount <= original_amount`
/// - `discount_amount == original_amount - final_amount`
/// - all amounts are non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    pub original_amount: Money,
    pub discount_amount: Money,
    pub final_amount: Money,
}

/// Applies a discount rule to a price.
///
/// Pure and side-effect free. Percent discounts round half-up to whole
/// currency units, matching the catalog's whole-unit prices; fixed
/// discounts never exceed the price; the final amount never goes below
/// zero.
///
/// # Errors
///
/// Returns `CouponError::CalculationIntegrity` if the computed final
/// amount exceeds the original. That branch is unreachable under correct
/// rules and exists as a sanity check on the inputs.
pub fn compute_discount(
    original_amount: Money,
    rule: &DiscountRule,
) -> Result<DiscountResult, CouponError> {
    let discount_amount = match rule {
        DiscountRule::Percent { percent } => original_amount.percent_of(*percent),
        DiscountRule::FixedAmount { amount } => (*amount).min(original_amount),
    };
    let final_amount = original_amount.saturating_sub(discount_amount);

    if final_amount > original_amount {
        return Err(CouponError::calculation_integrity());
    }

    Ok(DiscountResult {
        original_amount,
        discount_amount,
        final_amount,
    })
}
