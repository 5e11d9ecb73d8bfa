//! Coupon session - the checkout stacking and lock guard.
//!
//! A session is ephemeral, device-local state recording which coupon is
//! applied to the current checkout. It exists to prevent two bugs:
//! stacking several discounts in one checkout, and changing the discount
//! after the charge amount has been quoted to the payment gateway.
//!
//! The session is a plain value object; persistence is an injected
//! [`crate::ports::SessionStore`], never ambient global state.
//!
//! # Lifecycle
//!
//! - created on first successful validation of a coupon for a plan
//! - cleared on expiry (fixed TTL, checked lazily on every read), on plan
//!   switch, or after successful redemption
//! - locked exactly once at payment initiation; irreversible

use serde::{Deserialize, Serialize};

use crate::domain::catalog::PlanType;
use crate::domain::foundation::{CouponId, StateMachine, Timestamp};

use super::{CouponCode, CouponError};

/// Session guard states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No coupon applied.
    Absent,
    /// A coupon is applied and may still be replaced or cleared.
    Active,
    /// Payment has started; no mutation allowed.
    Locked,
}

impl StateMachine for SessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            (Absent, Active)
                | (Active, Active) // idempotent re-validation or plan-switch restart
                | (Active, Absent) // TTL expiry or explicit release
                | (Active, Locked)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            Absent => vec![Active],
            Active => vec![Active, Absent, Locked],
            Locked => vec![],
        }
    }
}

/// Decision the guard hands back when an active session sees a new
/// validation attempt for the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionGuardDecision {
    /// Same code, same plan: the existing session stands and eligibility
    /// rules are not charged a second time.
    Idempotent,
    /// Same code, different plan: clear and restart the session.
    RestartForPlanChange,
}

/// An applied-coupon session for one checkout attempt.
///
/// Serialized under a fixed storage key as
/// `{couponId, couponCode, planType, appliedAt, locked}` with `appliedAt`
/// in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponSession {
    coupon_id: CouponId,
    coupon_code: CouponCode,
    plan_type: PlanType,
    #[serde(with = "epoch_ms")]
    applied_at: Timestamp,
    locked: bool,
}

impl CouponSession {
    /// Soft time-to-live enforced lazily at read time.
    pub const DEFAULT_TTL_MINUTES: i64 = 30;

    /// Starts a session for a freshly validated coupon.
    pub fn start(
        coupon_id: CouponId,
        coupon_code: CouponCode,
        plan_type: PlanType,
        now: Timestamp,
    ) -> Self {
        Self {
            coupon_id,
            coupon_code,
            plan_type,
            applied_at: now,
            locked: false,
        }
    }

    pub fn coupon_id(&self) -> CouponId {
        self.coupon_id
    }

    pub fn coupon_code(&self) -> &CouponCode {
        &self.coupon_code
    }

    pub fn plan_type(&self) -> PlanType {
        self.plan_type
    }

    pub fn applied_at(&self) -> Timestamp {
        self.applied_at
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Current guard state of this (existing) session.
    pub fn state(&self) -> SessionState {
        if self.locked {
            SessionState::Locked
        } else {
            SessionState::Active
        }
    }

    /// Returns true if the TTL has elapsed since creation.
    ///
    /// Locked sessions never expire: payment is in flight and the quoted
    /// amount must stay pinned.
    pub fn is_expired(&self, now: Timestamp, ttl_minutes: i64) -> bool {
        !self.locked && self.applied_at.plus_minutes(ttl_minutes).is_before(&now)
    }

    /// Lazy-expiry read: drops the session if its TTL has elapsed.
    pub fn fresh(self, now: Timestamp, ttl_minutes: i64) -> Option<Self> {
        if self.is_expired(now, ttl_minutes) {
            None
        } else {
            Some(self)
        }
    }

    /// Guard check for a new validation attempt against this session.
    ///
    /// # Errors
    ///
    /// - `SessionLocked` if payment has started
    /// - `AlreadyApplied` if a different code is active
    pub fn guard(
        &self,
        code: &CouponCode,
        plan: PlanType,
    ) -> Result<SessionGuardDecision, CouponError> {
        if self.locked {
            return Err(CouponError::session_locked());
        }
        if code != &self.coupon_code {
            return Err(CouponError::already_applied(self.coupon_code.clone()));
        }
        if plan == self.plan_type {
            Ok(SessionGuardDecision::Idempotent)
        } else {
            Ok(SessionGuardDecision::RestartForPlanChange)
        }
    }

    /// Locks the session at payment initiation. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `SessionLocked` if called a second time.
    pub fn lock(&mut self) -> Result<(), CouponError> {
        if self.locked {
            return Err(CouponError::session_locked());
        }
        self.locked = true;
        Ok(())
    }
}

mod epoch_ms {
    //! Serializes `appliedAt` as epoch milliseconds.

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::foundation::Timestamp;

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(ts.as_epoch_ms())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Ok(Timestamp::from_epoch_ms(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CouponCode {
        CouponCode::try_new(s).unwrap()
    }

    fn session_at(now: Timestamp) -> CouponSession {
        CouponSession::start(CouponId::new(), code("SAVE20"), PlanType::Monthly, now)
    }

    const TTL: i64 = CouponSession::DEFAULT_TTL_MINUTES;

    // State machine tests

    #[test]
    fn absent_can_only_become_active() {
        assert!(SessionState::Absent.can_transition_to(&SessionState::Active));
        assert!(!SessionState::Absent.can_transition_to(&SessionState::Locked));
    }

    #[test]
    fn active_can_lock_clear_or_refresh() {
        assert!(SessionState::Active.can_transition_to(&SessionState::Locked));
        assert!(SessionState::Active.can_transition_to(&SessionState::Absent));
        assert!(SessionState::Active.can_transition_to(&SessionState::Active));
    }

    #[test]
    fn locked_is_terminal() {
        assert!(SessionState::Locked.is_terminal());
    }

    // Guard tests

    #[test]
    fn new_session_is_active_and_unlocked() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let session = session_at(now);
        assert_eq!(session.state(), SessionState::Active);
        assert!(!session.is_locked());
        assert_eq!(session.applied_at(), now);
    }

    #[test]
    fn same_code_same_plan_is_idempotent() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let session = session_at(now);
        let decision = session.guard(&code("SAVE20"), PlanType::Monthly).unwrap();
        assert_eq!(decision, SessionGuardDecision::Idempotent);
    }

    #[test]
    fn different_code_fails_with_already_applied() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let session = session_at(now);
        let result = session.guard(&code("WINTER10"), PlanType::Monthly);
        match result {
            Err(CouponError::AlreadyApplied { active_code }) => {
                assert_eq!(active_code, code("SAVE20"));
            }
            other => panic!("Expected AlreadyApplied, got {:?}", other),
        }
    }

    #[test]
    fn same_code_different_plan_restarts() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let session = session_at(now);
        let decision = session.guard(&code("SAVE20"), PlanType::Quarterly).unwrap();
        assert_eq!(decision, SessionGuardDecision::RestartForPlanChange);
    }

    #[test]
    fn any_guard_check_fails_once_locked() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let mut session = session_at(now);
        session.lock().unwrap();

        // Even the previously idempotent input is rejected.
        let result = session.guard(&code("SAVE20"), PlanType::Monthly);
        assert!(matches!(result, Err(CouponError::SessionLocked)));
    }

    // Lock tests

    #[test]
    fn lock_transitions_exactly_once() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let mut session = session_at(now);
        assert!(session.lock().is_ok());
        assert!(session.is_locked());
        assert_eq!(session.state(), SessionState::Locked);

        let second = session.lock();
        assert!(matches!(second, Err(CouponError::SessionLocked)));
        assert!(session.is_locked());
    }

    // Expiry tests

    #[test]
    fn session_survives_within_ttl() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let session = session_at(now);
        let later = now.plus_minutes(TTL);
        assert!(!session.is_expired(later, TTL));
        assert!(session.clone().fresh(later, TTL).is_some());
    }

    #[test]
    fn session_expires_after_ttl() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let session = session_at(now);
        let later = now.plus_minutes(TTL).plus_secs(1);
        assert!(session.is_expired(later, TTL));
        assert!(session.fresh(later, TTL).is_none());
    }

    #[test]
    fn locked_session_never_expires() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let mut session = session_at(now);
        session.lock().unwrap();
        let much_later = now.add_days(7);
        assert!(!session.is_expired(much_later, TTL));
        assert!(session.fresh(much_later, TTL).is_some());
    }

    // Serialization tests

    #[test]
    fn serializes_with_contract_field_names() {
        let now = Timestamp::from_epoch_ms(1_705_276_800_000);
        let session = session_at(now);
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"couponId\""));
        assert!(json.contains("\"couponCode\":\"SAVE20\""));
        assert!(json.contains("\"planType\":\"month\""));
        assert!(json.contains("\"appliedAt\":1705276800000"));
        assert!(json.contains("\"locked\":false"));
    }

    #[test]
    fn roundtrips_through_json() {
        let now = Timestamp::from_epoch_ms(1_705_276_800_000);
        let mut session = session_at(now);
        session.lock().unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let back: CouponSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
        assert!(back.is_locked());
    }
}
