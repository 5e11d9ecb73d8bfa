//! ValidateCouponHandler - checks a discount code for the checkout screen.
//!
//! Orchestrates the fixed validation pipeline: session guard, store
//! lookup, eligibility rules, discount calculation, session refresh.
//! Every failure is returned as a value with a distinct user-facing
//! message, and a failed validation never mutates the session.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::catalog::{standard_pricing, PlanType, PricingTable};
use crate::domain::coupon::{
    compute_discount, AssignmentCheck, Coupon, CouponCode, CouponError, CouponSession,
    CouponSummary, DiscountResult, SessionGuardDecision,
};
use crate::domain::foundation::{EmailAddress, Timestamp, UserId};
use crate::ports::{CouponStore, SessionStore};

/// Command to validate a coupon code against a plan.
///
/// `now` is injected by the caller so date-boundary behavior is
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct ValidateCouponCommand {
    /// Raw code as typed by the user.
    pub code: String,
    pub plan_type: PlanType,
    pub user_id: Option<UserId>,
    pub user_email: Option<EmailAddress>,
    pub now: Timestamp,
}

/// Result of a successful validation.
#[derive(Debug, Clone)]
pub struct ValidateCouponResult {
    /// Public coupon fields for the checkout screen.
    pub coupon: CouponSummary,
    /// Quoted amounts.
    pub discount: DiscountResult,
    /// The session now guarding this checkout.
    pub session: CouponSession,
    /// True when an identical validation was already active and the
    /// eligibility rules were not charged a second time.
    pub idempotent: bool,
}

/// Handler for coupon validation.
pub struct ValidateCouponHandler {
    coupon_store: Arc<dyn CouponStore>,
    session_store: Arc<dyn SessionStore>,
    pricing: PricingTable,
    session_ttl_minutes: i64,
}

impl ValidateCouponHandler {
    pub fn new(coupon_store: Arc<dyn CouponStore>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            coupon_store,
            session_store,
            pricing: standard_pricing().clone(),
            session_ttl_minutes: CouponSession::DEFAULT_TTL_MINUTES,
        }
    }

    /// Overrides the pricing table (tests, regional catalogs).
    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    /// Overrides the session time-to-live.
    pub fn with_session_ttl_minutes(mut self, minutes: i64) -> Self {
        self.session_ttl_minutes = minutes;
        self
    }

    pub async fn handle(
        &self,
        cmd: ValidateCouponCommand,
    ) -> Result<ValidateCouponResult, CouponError> {
        // 1. Input validation, before any store access.
        let code = CouponCode::try_new(&cmd.code)?;

        // 2. Session guard. Expired sessions are dropped lazily here.
        let session = self.load_fresh_session(cmd.now).await?;

        if let Some(session) = &session {
            match session.guard(&code, cmd.plan_type)? {
                SessionGuardDecision::Idempotent => {
                    debug!(code = %code, "coupon re-validated, returning existing session");
                    return self.idempotent_result(session.clone(), &code).await;
                }
                SessionGuardDecision::RestartForPlanChange => {
                    debug!(code = %code, plan = %cmd.plan_type, "plan changed, restarting session");
                    // Fall through to a full validation; the session is
                    // replaced only after the rules pass.
                }
            }
        }

        // 3. Lookup by normalized code.
        let coupon = self.lookup(&code).await?;

        // 4.-6. Eligibility rules, in fixed order.
        self.check_eligibility(&coupon, &cmd)?;
        self.check_prior_usage(&coupon, cmd.user_id.as_ref())
            .await?;

        // 7. Shared discount calculation.
        let price = self.pricing.price_of(cmd.plan_type);
        let discount = compute_discount(price, &coupon.rule).inspect_err(|_| {
            warn!(coupon_id = %coupon.id, "discount calculation failed integrity check");
        })?;

        // 8. Create/refresh the session only after everything passed.
        let session = CouponSession::start(coupon.id, coupon.code.clone(), cmd.plan_type, cmd.now);
        self.session_store.save(&session).await?;

        Ok(ValidateCouponResult {
            coupon: coupon.summary(),
            discount,
            session,
            idempotent: false,
        })
    }

    /// Loads the stored session, dropping it if the TTL elapsed.
    async fn load_fresh_session(
        &self,
        now: Timestamp,
    ) -> Result<Option<CouponSession>, CouponError> {
        let stored = self.session_store.load().await?;
        match stored {
            Some(session) => match session.fresh(now, self.session_ttl_minutes) {
                Some(session) => Ok(Some(session)),
                None => {
                    debug!("coupon session expired, clearing");
                    self.session_store.clear().await?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Re-validation of the code already guarding this checkout: the
    /// coupon is re-read for its amounts, but eligibility rules are not
    /// charged a second time and the session keeps its timestamps.
    async fn idempotent_result(
        &self,
        session: CouponSession,
        code: &CouponCode,
    ) -> Result<ValidateCouponResult, CouponError> {
        let coupon = self.lookup(code).await?;
        let price = self.pricing.price_of(session.plan_type());
        let discount = compute_discount(price, &coupon.rule)?;

        Ok(ValidateCouponResult {
            coupon: coupon.summary(),
            discount,
            session,
            idempotent: true,
        })
    }

    async fn lookup(&self, code: &CouponCode) -> Result<Coupon, CouponError> {
        let coupon = self.coupon_store.find_coupon_by_code(code).await?;
        match coupon {
            Some(coupon) if coupon.is_active => Ok(coupon),
            // Unknown and deactivated codes share one rejection.
            _ => Err(CouponError::not_found(code.clone())),
        }
    }

    /// Rules 3-6 of the pipeline. Pure checks except the usage lookup.
    fn check_eligibility(
        &self,
        coupon: &Coupon,
        cmd: &ValidateCouponCommand,
    ) -> Result<(), CouponError> {
        if coupon.is_expired(cmd.now) {
            return Err(CouponError::expired(
                coupon.code.clone(),
                coupon.expires_at.unwrap_or(cmd.now),
            ));
        }
        if coupon.is_exhausted() {
            return Err(CouponError::usage_limit_reached(
                coupon.code.clone(),
                coupon.used_count,
                coupon.usage_limit.unwrap_or(coupon.used_count),
            ));
        }
        if !coupon.allows_plan(cmd.plan_type) {
            return Err(CouponError::plan_not_eligible(
                coupon.code.clone(),
                cmd.plan_type,
            ));
        }
        match coupon.check_assignment(cmd.user_id.as_ref(), cmd.user_email.as_ref()) {
            AssignmentCheck::NotPersonal | AssignmentCheck::Match => Ok(()),
            AssignmentCheck::Anonymous => Err(CouponError::sign_in_required()),
            AssignmentCheck::Mismatch => Err(CouponError::assigned_to_another_user()),
        }
    }

    /// Personal coupons additionally require that the caller has not
    /// already redeemed them. Separate from `check_eligibility` because
    /// it needs a store round trip.
    async fn check_prior_usage(
        &self,
        coupon: &Coupon,
        user_id: Option<&UserId>,
    ) -> Result<(), CouponError> {
        if !coupon.is_personal() {
            return Ok(());
        }
        let user_id = match user_id {
            Some(id) => id,
            // Matched by email without an id; nothing to look up.
            None => return Ok(()),
        };
        let usage = self.coupon_store.find_usage(coupon.id, user_id).await?;
        if usage.is_some() {
            return Err(CouponError::already_used(coupon.code.clone()));
        }
        Ok(())
    }
}
