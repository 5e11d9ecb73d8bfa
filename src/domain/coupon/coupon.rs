//! Coupon record and eligibility helpers.
//!
//! Coupons are created and edited by an administrative collaborator; this
//! engine only reads them. The record therefore carries no mutators
//! beyond what the external store reports back (`used_count`).
//!
//! # Invariants
//!
//! - `used_count <= usage_limit` whenever a limit is set
//! - percent magnitudes are in (0, 100] (enforced by [`DiscountRule`])

use serde::{Deserialize, Serialize};

use crate::domain::catalog::PlanType;
use crate::domain::foundation::{CouponId, EmailAddress, Timestamp, UserId, ValidationError};

use super::{CouponCode, DiscountKind, DiscountRule};

/// Personal assignment of a coupon to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponAssignment {
    /// Assigned by auth-provider user id.
    UserId(UserId),
    /// Assigned by email address.
    Email(EmailAddress),
}

/// Outcome of matching a caller against a coupon's assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentCheck {
    /// Coupon is not personally assigned; anyone may use it.
    NotPersonal,
    /// Caller matches the assignment.
    Match,
    /// Caller is signed in but does not match.
    Mismatch,
    /// Coupon is personal and the caller is anonymous.
    Anonymous,
}

/// A discount coupon as read from the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique identifier.
    pub id: CouponId,

    /// Normalized (uppercase) code.
    pub code: CouponCode,

    /// Discount kind and magnitude.
    pub rule: DiscountRule,

    /// Plans this coupon may be applied to.
    pub allowed_plans: Vec<PlanType>,

    /// Optional campaign end.
    pub expires_at: Option<Timestamp>,

    /// Optional redemption cap.
    pub usage_limit: Option<u32>,

    /// Redemptions recorded so far.
    pub used_count: u32,

    /// Optional single-user assignment.
    pub assigned_to: Option<CouponAssignment>,

    /// Admin kill switch.
    pub is_active: bool,
}

impl Coupon {
    /// Creates a coupon record, checking the usage-counter invariant.
    pub fn try_new(
        id: CouponId,
        code: CouponCode,
        rule: DiscountRule,
        allowed_plans: Vec<PlanType>,
    ) -> Result<Self, ValidationError> {
        if allowed_plans.is_empty() {
            return Err(ValidationError::empty_field("allowed_plans"));
        }
        Ok(Self {
            id,
            code,
            rule,
            allowed_plans,
            expires_at: None,
            usage_limit: None,
            used_count: 0,
            assigned_to: None,
            is_active: true,
        })
    }

    /// Sets an expiry timestamp.
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Sets a usage cap.
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Assigns the coupon to a single user.
    pub fn assigned(mut self, assignment: CouponAssignment) -> Self {
        self.assigned_to = Some(assignment);
        self
    }

    /// Deactivates the coupon.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns true if the coupon expired before `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at.is_before(&now),
            None => false,
        }
    }

    /// Returns true if the usage cap has been reached.
    pub fn is_exhausted(&self) -> bool {
        match self.usage_limit {
            Some(limit) => self.used_count >= limit,
            None => false,
        }
    }

    /// Returns true if the coupon covers the given plan.
    pub fn allows_plan(&self, plan: PlanType) -> bool {
        self.allowed_plans.contains(&plan)
    }

    /// Returns true if the coupon is assigned to a specific user.
    pub fn is_personal(&self) -> bool {
        self.assigned_to.is_some()
    }

    /// Matches a caller's identity against the coupon's assignment.
    pub fn check_assignment(
        &self,
        user_id: Option<&UserId>,
        email: Option<&EmailAddress>,
    ) -> AssignmentCheck {
        let assignment = match &self.assigned_to {
            Some(a) => a,
            None => return AssignmentCheck::NotPersonal,
        };
        if user_id.is_none() && email.is_none() {
            return AssignmentCheck::Anonymous;
        }
        let matches = match assignment {
            CouponAssignment::UserId(assigned) => user_id == Some(assigned),
            CouponAssignment::Email(assigned) => email == Some(assigned),
        };
        if matches {
            AssignmentCheck::Match
        } else {
            AssignmentCheck::Mismatch
        }
    }

    /// Public fields returned to the checkout screen on success.
    pub fn summary(&self) -> CouponSummary {
        CouponSummary {
            id: self.id,
            code: self.code.clone(),
            rule: self.rule,
            personal: self.is_personal(),
        }
    }
}

/// The coupon fields a checkout screen is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponSummary {
    pub id: CouponId,
    pub code: CouponCode,
    /// Discount kind and magnitude, serialized as a tagged object.
    pub rule: DiscountRule,
    pub personal: bool,
}

impl CouponSummary {
    /// Returns the discount kind.
    pub fn kind(&self) -> DiscountKind {
        self.rule.kind()
    }
}
