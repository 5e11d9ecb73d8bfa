//! Pricing table - canonical plan prices.
//!
//! The single source of truth every discount and refund calculation
//! depends on. Exactly one price per plan, immutable once constructed.

use once_cell::sync::Lazy;

use super::PlanType;
use crate::domain::foundation::Money;

/// Immutable mapping from plan type to its canonical price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    daily: Money,
    weekly: Money,
    monthly: Money,
    quarterly: Money,
}

impl PricingTable {
    /// Creates a pricing table with one price per plan.
    pub fn new(daily: Money, weekly: Money, monthly: Money, quarterly: Money) -> Self {
        Self {
            daily,
            weekly,
            monthly,
            quarterly,
        }
    }

    /// Returns the canonical price for a plan.
    pub fn price_of(&self, plan: PlanType) -> Money {
        match plan {
            PlanType::Daily => self.daily,
            PlanType::Weekly => self.weekly,
            PlanType::Monthly => self.monthly,
            PlanType::Quarterly => self.quarterly,
        }
    }
}

static STANDARD: Lazy<PricingTable> = Lazy::new(|| {
    PricingTable::new(
        Money::from_units(5),
        Money::from_units(29),
        Money::from_units(99),
        Money::from_units(249),
    )
});

/// Returns the platform's standard pricing table.
pub fn standard_pricing() -> &'static PricingTable {
    &STANDARD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_plan_has_a_price() {
        let table = standard_pricing();
        for plan in PlanType::ALL {
            assert!(table.price_of(plan) > Money::ZERO);
        }
    }

    #[test]
    fn standard_monthly_price_is_99() {
        assert_eq!(standard_pricing().price_of(PlanType::Monthly), Money::from_units(99));
    }

    #[test]
    fn custom_table_returns_configured_prices() {
        let table = PricingTable::new(
            Money::from_units(1),
            Money::from_units(2),
            Money::from_units(3),
            Money::from_units(4),
        );
        assert_eq!(table.price_of(PlanType::Daily), Money::from_units(1));
        assert_eq!(table.price_of(PlanType::Quarterly), Money::from_units(4));
    }

    #[test]
    fn longer_plans_cost_more() {
        let table = standard_pricing();
        assert!(table.price_of(PlanType::Daily) < table.price_of(PlanType::Weekly));
        assert!(table.price_of(PlanType::Weekly) < table.price_of(PlanType::Monthly));
        assert!(table.price_of(PlanType::Monthly) < table.price_of(PlanType::Quarterly));
    }
}
