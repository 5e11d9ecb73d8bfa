//! Pure refund proration calculator.
//!
//! Computes the legally-constrained partial refund for a mid-term
//! cancellation. The function is side-effect free; the decision to
//! execute a refund against the payment gateway belongs to the caller,
//! after a human-visible preview built from this calculation.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::PlanType;
use crate::domain::foundation::{Money, Timestamp};

use super::RefundPolicy;

/// Result of a refund calculation.
///
/// # Invariants
///
/// - `refund_amount` is never negative
/// - `refund_amount` is zero when `eligible` is false, and at least the
///   policy minimum when `eligible` is true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundCalculation {
    pub unused_days: i64,
    pub total_days: i64,
    pub cancellation_fee: Money,
    pub refund_amount: Money,
    pub eligible: bool,
}

impl RefundCalculation {
    fn ineligible(unused_days: i64, total_days: i64, cancellation_fee: Money) -> Self {
        Self {
            unused_days,
            total_days,
            cancellation_fee,
            refund_amount: Money::ZERO,
            eligible: false,
        }
    }
}

/// Computes the prorated refund for cancelling a subscription.
///
/// Rules:
/// - daily plans are categorically ineligible (the service is consumed
///   in full on purchase)
/// - day counts round up: any started day counts as a whole day
/// - the refund is `original * unused/total` minus the policy fee
/// - results below the policy minimum are treated as zero/ineligible
///
/// All dates are injected; the calculator never reads the system clock.
pub fn calculate_refund(
    original_amount: Money,
    start_date: Timestamp,
    end_date: Timestamp,
    cancel_date: Timestamp,
    plan_type: PlanType,
    policy: &RefundPolicy,
) -> RefundCalculation {
    let total_days = start_date.days_until_ceil(&end_date);

    if plan_type.is_daily() {
        return RefundCalculation::ineligible(0, total_days, Money::ZERO);
    }
    if total_days <= 0 {
        return RefundCalculation::ineligible(0, total_days, Money::ZERO);
    }

    // Cancelling before the period start refunds at most the full amount.
    let unused_days = cancel_date.days_until_ceil(&end_date).min(total_days);
    if unused_days <= 0 {
        return RefundCalculation::ineligible(0, total_days, Money::ZERO);
    }

    let refund_before_fee = original_amount.ratio(unused_days, total_days);
    let cancellation_fee = policy.fee_for(original_amount);
    let refund_amount = refund_before_fee.saturating_sub(cancellation_fee);

    if refund_amount < policy.minimum_refund {
        return RefundCalculation::ineligible(unused_days, total_days, cancellation_fee);
    }

    RefundCalculation {
        unused_days,
        total_days,
        cancellation_fee,
        refund_amount,
        eligible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(n: i64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).add_days(n)
    }

    fn policy() -> RefundPolicy {
        RefundPolicy::default()
    }

    #[test]
    fn daily_plan_is_never_eligible() {
        let calc = calculate_refund(
            Money::from_units(5),
            day(0),
            day(1),
            day(0),
            PlanType::Daily,
            &policy(),
        );
        assert!(!calc.eligible);
        assert_eq!(calc.refund_amount, Money::ZERO);
    }

    #[test]
    fn daily_plan_ineligible_regardless_of_dates() {
        // Even a cancel date before the start changes nothing.
        let calc = calculate_refund(
            Money::from_units(5),
            day(10),
            day(11),
            day(0),
            PlanType::Daily,
            &policy(),
        );
        assert!(!calc.eligible);
        assert_eq!(calc.refund_amount, Money::ZERO);
    }

    #[test]
    fn cancel_on_end_date_has_no_unused_days() {
        let calc = calculate_refund(
            Money::from_units(99),
            day(0),
            day(30),
            day(30),
            PlanType::Monthly,
            &policy(),
        );
        assert_eq!(calc.unused_days, 0);
        assert!(!calc.eligible);
        assert_eq!(calc.refund_amount, Money::ZERO);
    }

    #[test]
    fn cancel_on_start_date_refunds_all_minus_fee() {
        // 100 units over 30 days, cancelled immediately:
        // fee min(5, 100) = 5, refund 95.
        let calc = calculate_refund(
            Money::from_units(100),
            day(0),
            day(30),
            day(0),
            PlanType::Monthly,
            &policy(),
        );
        assert!(calc.eligible);
        assert_eq!(calc.total_days, 30);
        assert_eq!(calc.unused_days, 30);
        assert_eq!(calc.cancellation_fee, Money::from_units(5));
        assert_eq!(calc.refund_amount, Money::from_units(95));
    }

    #[test]
    fn midterm_cancel_prorates() {
        let calc = calculate_refund(
            Money::from_units(100),
            day(0),
            day(30),
            day(15),
            PlanType::Monthly,
            &policy(),
        );
        assert!(calc.eligible);
        assert_eq!(calc.unused_days, 15);
        // 100 * 15/30 = 50, minus fee 5.
        assert_eq!(calc.refund_amount, Money::from_units(45));
    }

    #[test]
    fn partial_days_count_as_whole_days() {
        let start = day(0);
        let end = day(30);
        let cancel = day(15).plus_secs(3600);
        let calc = calculate_refund(
            Money::from_units(100),
            start,
            end,
            cancel,
            PlanType::Monthly,
            &policy(),
        );
        // 14 days and 23 hours remain: rounds up to 15.
        assert_eq!(calc.unused_days, 15);
    }

    #[test]
    fn fee_is_capped_at_policy_cap() {
        let calc = calculate_refund(
            Money::from_units(10_000),
            day(0),
            day(90),
            day(0),
            PlanType::Quarterly,
            &policy(),
        );
        assert!(calc.eligible);
        assert_eq!(calc.cancellation_fee, Money::from_units(100));
        assert_eq!(calc.refund_amount, Money::from_units(9_900));
    }

    #[test]
    fn sub_minimum_refund_is_treated_as_zero() {
        // 29 units over 7 days, cancelled with 1 day left:
        // 29/7 = 4.14 prorated, minus 1.45 fee = 2.69 -> eligible.
        // Shrink to make it fall under the 2-unit floor instead.
        let calc = calculate_refund(
            Money::from_units(20),
            day(0),
            day(7),
            day(6),
            PlanType::Weekly,
            &policy(),
        );
        // 20 * 1/7 = 2.86, minus fee 1.00 = 1.86 < 2.00 minimum.
        assert!(!calc.eligible);
        assert_eq!(calc.refund_amount, Money::ZERO);
        assert_eq!(calc.unused_days, 1);
    }

    #[test]
    fn fee_exceeding_proration_floors_at_zero() {
        // Tiny remainder: proration smaller than the fee must not go
        // negative.
        let calc = calculate_refund(
            Money::from_units(100),
            day(0),
            day(30),
            day(29),
            PlanType::Monthly,
            &policy(),
        );
        // 100 * 1/30 = 3.33, minus fee 5.00 floors at 0.
        assert!(!calc.eligible);
        assert_eq!(calc.refund_amount, Money::ZERO);
    }

    #[test]
    fn cancel_before_start_refunds_at_most_the_full_amount() {
        let calc = calculate_refund(
            Money::from_units(100),
            day(0),
            day(30),
            day(0).minus_days(5),
            PlanType::Monthly,
            &policy(),
        );
        assert!(calc.eligible);
        assert_eq!(calc.unused_days, 30);
        assert_eq!(calc.refund_amount, Money::from_units(95));
    }

    #[test]
    fn degenerate_period_is_ineligible() {
        let calc = calculate_refund(
            Money::from_units(100),
            day(10),
            day(10),
            day(5),
            PlanType::Monthly,
            &policy(),
        );
        assert!(!calc.eligible);
        assert_eq!(calc.total_days, 0);
    }

    #[test]
    fn result_serializes_camel_case() {
        let calc = calculate_refund(
            Money::from_units(100),
            day(0),
            day(30),
            day(0),
            PlanType::Monthly,
            &policy(),
        );
        let json = serde_json::to_string(&calc).unwrap();
        assert!(json.contains("unusedDays"));
        assert!(json.contains("totalDays"));
        assert!(json.contains("cancellationFee"));
        assert!(json.contains("refundAmount"));
        assert!(json.contains("eligible"));
    }

    proptest! {
        #[test]
        fn refund_never_negative_and_never_exceeds_original(
            units in 1i64..100_000,
            total in 1i64..365,
            cancel_offset in -30i64..400,
        ) {
            let start = day(0);
            let end = start.add_days(total);
            let cancel = start.add_days(cancel_offset);
            let calc = calculate_refund(
                Money::from_units(units),
                start,
                end,
                cancel,
                PlanType::Monthly,
                &policy(),
            );
            prop_assert!(calc.refund_amount >= Money::ZERO);
            prop_assert!(calc.refund_amount <= Money::from_units(units));
        }

        #[test]
        fn refund_is_monotonically_non_increasing_in_cancel_date(
            units in 1i64..100_000,
            total in 2i64..365,
            offset in 0i64..364,
        ) {
            prop_assume!(offset + 1 <= total);
            let start = day(0);
            let end = start.add_days(total);
            let earlier = calculate_refund(
                Money::from_units(units),
                start,
                end,
                start.add_days(offset),
                PlanType::Monthly,
                &policy(),
            );
            let later = calculate_refund(
                Money::from_units(units),
                start,
                end,
                start.add_days(offset + 1),
                PlanType::Monthly,
                &policy(),
            );
            prop_assert!(later.refund_amount <= earlier.refund_amount);
        }
    }
}
