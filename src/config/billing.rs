//! Billing configuration (coupon sessions and refund policy)

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::{Money, Percentage};
use crate::domain::refund::RefundPolicy;

/// Billing configuration section
///
/// Policy knobs for the coupon and refund flows. Defaults match the
/// published terms of service; environments override them only for
/// testing and regional rollouts.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// How long an applied coupon stays valid on a checkout, in minutes
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,

    /// Cancellation fee as a percentage of the original amount
    #[serde(default = "default_fee_percent")]
    pub fee_percent: u8,

    /// Upper bound on the cancellation fee, in whole currency units
    #[serde(default = "default_fee_cap_units")]
    pub fee_cap_units: i64,

    /// Refunds below this amount are treated as zero, in whole units
    #[serde(default = "default_minimum_refund_units")]
    pub minimum_refund_units: i64,
}

fn default_session_ttl_minutes() -> i64 {
    30
}

fn default_fee_percent() -> u8 {
    5
}

fn default_fee_cap_units() -> i64 {
    100
}

fn default_minimum_refund_units() -> i64 {
    2
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: default_session_ttl_minutes(),
            fee_percent: default_fee_percent(),
            fee_cap_units: default_fee_cap_units(),
            minimum_refund_units: default_minimum_refund_units(),
        }
    }
}

impl BillingConfig {
    /// Validate billing configuration
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any value is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_ttl_minutes < 1 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.fee_percent > 100 {
            return Err(ValidationError::InvalidFeePercent);
        }
        if self.fee_cap_units < 0 {
            return Err(ValidationError::InvalidFeeCap);
        }
        if self.minimum_refund_units < 0 {
            return Err(ValidationError::InvalidMinimumRefund);
        }
        Ok(())
    }

    /// Builds the refund policy these settings describe.
    pub fn refund_policy(&self) -> RefundPolicy {
        RefundPolicy::new(
            Percentage::new(self.fee_percent),
            Money::from_units(self.fee_cap_units),
            Money::from_units(self.minimum_refund_units),
        )
    }
}
