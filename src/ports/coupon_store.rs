//! Coupon store port.
//!
//! Contract for the external coupon/usage/subscription store. The engine
//! never writes coupons; it reads them, checks usage, and requests the
//! one atomic write of the whole flow: recording a redemption.
//!
//! Retries, timeouts and connection handling belong to the adapter; a
//! failure here surfaces as a generic store error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::PlanType;
use crate::domain::coupon::{Coupon, CouponCode};
use crate::domain::foundation::{CouponId, DomainError, Money, SubscriptionId, Timestamp, UserId};

/// A recorded coupon redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub coupon_id: CouponId,
    pub user_id: UserId,
    pub plan_type: PlanType,
    pub original_amount: Money,
    pub discount_amount: Money,
    pub final_amount: Money,
    pub redeemed_at: Timestamp,
}

/// The caller's active subscription, as the store reports it.
///
/// Input shape for refund previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnapshot {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan_type: PlanType,
    pub original_amount: Money,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// Port for the external coupon and usage store.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Looks up a coupon by its normalized code.
    ///
    /// Returns `None` when no coupon carries the code. Inactive coupons
    /// are returned as-is; the validator decides how to reject them.
    async fn find_coupon_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, DomainError>;

    /// Looks up a prior redemption of a coupon by a user.
    async fn find_usage(
        &self,
        coupon_id: CouponId,
        user_id: &UserId,
    ) -> Result<Option<UsageRecord>, DomainError>;

    /// Atomically increments the coupon's usage counter and inserts a
    /// usage row.
    ///
    /// The store owns the compare-and-increment: concurrent redemptions
    /// of a capped coupon must not double-spend. One round trip; the
    /// engine only requests it and surfaces failure.
    async fn atomic_record_usage(&self, record: UsageRecord) -> Result<(), DomainError>;

    /// Returns the caller's active subscription, if any.
    async fn find_active_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionSnapshot>, DomainError>;
}
