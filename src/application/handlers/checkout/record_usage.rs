//! RecordCouponUsageHandler - books a redemption after payment settles.
//!
//! The payment flow calls this exactly once per successful charge. The
//! handler re-checks the quoted amounts, writes the usage record and
//! counter increment atomically through the store, then locks the
//! coupon session so the checkout cannot be re-quoted afterwards.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::catalog::PlanType;
use crate::domain::coupon::{CouponError, CouponSession};
use crate::domain::foundation::{CouponId, Money, Timestamp, UserId};
use crate::ports::{CouponStore, SessionStore, UsageRecord};

/// Command to record a settled coupon redemption.
///
/// Amounts are passed back in from the payment flow so the record holds
/// what was actually charged, not a recomputation.
#[derive(Debug, Clone)]
pub struct RecordCouponUsageCommand {
    pub coupon_id: CouponId,
    pub user_id: UserId,
    pub plan_type: PlanType,
    pub original_amount: Money,
    pub discount_amount: Money,
    pub final_amount: Money,
    pub now: Timestamp,
}

/// Result of recording a redemption.
#[derive(Debug, Clone)]
pub struct RecordCouponUsageResult {
    /// The persisted usage record.
    pub record: UsageRecord,
    /// The session after locking, if one guarded this checkout.
    pub session: Option<CouponSession>,
}

/// Handler for booking coupon redemptions.
pub struct RecordCouponUsageHandler {
    coupon_store: Arc<dyn CouponStore>,
    session_store: Arc<dyn SessionStore>,
}

impl RecordCouponUsageHandler {
    pub fn new(coupon_store: Arc<dyn CouponStore>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            coupon_store,
            session_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordCouponUsageCommand,
    ) -> Result<RecordCouponUsageResult, CouponError> {
        // The quoted amounts must still be internally consistent. A
        // mismatch means the payment flow charged something the engine
        // never quoted.
        if cmd.final_amount > cmd.original_amount
            || cmd.discount_amount > cmd.original_amount
            || cmd.original_amount.saturating_sub(cmd.discount_amount) != cmd.final_amount
        {
            warn!(
                coupon_id = %cmd.coupon_id,
                original = %cmd.original_amount,
                discount = %cmd.discount_amount,
                charged = %cmd.final_amount,
                "redemption amounts are inconsistent, refusing to record"
            );
            return Err(CouponError::calculation_integrity());
        }

        let record = UsageRecord {
            coupon_id: cmd.coupon_id,
            user_id: cmd.user_id,
            plan_type: cmd.plan_type,
            original_amount: cmd.original_amount,
            discount_amount: cmd.discount_amount,
            final_amount: cmd.final_amount,
            redeemed_at: cmd.now,
        };

        // Usage row and counter increment land in one atomic store
        // operation; the store rejects it if the limit was hit between
        // validation and payment.
        self.coupon_store
            .atomic_record_usage(record.clone())
            .await?;
        debug!(coupon_id = %cmd.coupon_id, "coupon usage recorded");

        let session = self.lock_matching_session(cmd.coupon_id).await?;

        Ok(RecordCouponUsageResult { record, session })
    }

    /// Locks the stored session if it guards the redeemed coupon.
    ///
    /// A session for a different coupon is left alone, and an already
    /// locked session stays locked. The usage record is the source of
    /// truth either way.
    async fn lock_matching_session(
        &self,
        coupon_id: CouponId,
    ) -> Result<Option<CouponSession>, CouponError> {
        let session = match self.session_store.load().await? {
            Some(session) if session.coupon_id() == coupon_id => session,
            _ => return Ok(None),
        };
        if session.is_locked() {
            return Ok(Some(session));
        }
        let mut locked = session;
        locked.lock()?;
        self.session_store.save(&locked).await?;
        Ok(Some(locked))
    }
}
