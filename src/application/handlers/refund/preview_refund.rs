//! PreviewRefundHandler - quotes the refund for a cancellation date.
//!
//! A preview, not a cancellation: nothing is written. The cancellation
//! flow shows this quote and only then asks the user to confirm.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::refund::{calculate_refund, RefundCalculation, RefundPolicy};
use crate::ports::{CouponStore, SubscriptionSnapshot};

/// Command to preview the refund for cancelling now (or on a chosen
/// date).
#[derive(Debug, Clone)]
pub struct PreviewRefundCommand {
    pub user_id: UserId,
    /// Effective cancellation date, usually the current time.
    pub cancel_date: Timestamp,
}

/// Refund quote for the caller's active subscription.
#[derive(Debug, Clone)]
pub struct PreviewRefundResult {
    pub subscription: SubscriptionSnapshot,
    pub calculation: RefundCalculation,
}

/// Handler for refund previews.
pub struct PreviewRefundHandler {
    store: Arc<dyn CouponStore>,
    policy: RefundPolicy,
}

impl PreviewRefundHandler {
    pub fn new(store: Arc<dyn CouponStore>) -> Self {
        Self {
            store,
            policy: RefundPolicy::default(),
        }
    }

    /// Overrides the refund policy (configured fee rate and cap).
    pub fn with_policy(mut self, policy: RefundPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// # Errors
    ///
    /// Fails with `SubscriptionNotFound` when the caller has no active
    /// subscription, or a store error when the lookup fails. An
    /// ineligible refund is not an error; the quote says so.
    pub async fn handle(
        &self,
        cmd: PreviewRefundCommand,
    ) -> Result<PreviewRefundResult, DomainError> {
        let subscription = self
            .store
            .find_active_subscription(&cmd.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SubscriptionNotFound,
                    "No active subscription found.",
                )
            })?;

        let calculation = calculate_refund(
            subscription.original_amount,
            subscription.start_date,
            subscription.end_date,
            cmd.cancel_date,
            subscription.plan_type,
            &self.policy,
        );
        debug!(
            subscription_id = %subscription.id,
            eligible = calculation.eligible,
            refund = %calculation.refund_amount,
            "refund previewed"
        );

        Ok(PreviewRefundResult {
            subscription,
            calculation,
        })
    }
}
