//! Coupon-specific error types.
//!
//! Every failure the engine can surface to a checkout screen. Errors are
//! returned as values, never thrown across the public boundary, and each
//! carries a distinct user-facing message rendered verbatim by the UI.
//!
//! Taxonomy (checked in the validator's fixed order, so outcomes are
//! deterministic even when several rules would fail):
//! - input: malformed code or plan, rejected before any store access
//! - session: another coupon active, or the session is locked
//! - eligibility: unknown/inactive, expired, over limit, wrong plan,
//!   wrong user, already used
//! - integrity: computed final amount exceeds the original
//! - collaborator: store unreachable or returned malformed data

use crate::domain::catalog::PlanType;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, ValidationError};

use super::CouponCode;

/// Coupon validation and session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponError {
    /// Input was malformed (empty code, unknown plan name).
    InvalidInput { message: String },

    /// A different coupon is already applied in this checkout.
    AlreadyApplied { active_code: CouponCode },

    /// Payment has started; the session is locked.
    SessionLocked,

    /// Code does not exist or the coupon is inactive.
    NotFound { code: CouponCode },

    /// Coupon expired before the validation attempt.
    Expired {
        code: CouponCode,
        expired_at: Timestamp,
    },

    /// Coupon has reached its usage cap.
    UsageLimitReached {
        code: CouponCode,
        used: u32,
        limit: u32,
    },

    /// Coupon does not cover the selected plan.
    PlanNotEligible { code: CouponCode, plan: PlanType },

    /// Coupon is personally assigned and the caller is anonymous.
    SignInRequired,

    /// Coupon is personally assigned to someone else.
    AssignedToAnotherUser,

    /// Caller already redeemed this personal coupon.
    AlreadyUsed { code: CouponCode },

    /// Computed final amount exceeded the original. Indicates a data or
    /// logic bug upstream; never silently tolerated.
    CalculationIntegrity,

    /// Collaborator store failed. Internals are logged, not surfaced.
    Store(String),
}

impl CouponError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CouponError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn already_applied(active_code: CouponCode) -> Self {
        CouponError::AlreadyApplied { active_code }
    }

    pub fn session_locked() -> Self {
        CouponError::SessionLocked
    }

    pub fn not_found(code: CouponCode) -> Self {
        CouponError::NotFound { code }
    }

    pub fn expired(code: CouponCode, expired_at: Timestamp) -> Self {
        CouponError::Expired { code, expired_at }
    }

    pub fn usage_limit_reached(code: CouponCode, used: u32, limit: u32) -> Self {
        CouponError::UsageLimitReached { code, used, limit }
    }

    pub fn plan_not_eligible(code: CouponCode, plan: PlanType) -> Self {
        CouponError::PlanNotEligible { code, plan }
    }

    pub fn sign_in_required() -> Self {
        CouponError::SignInRequired
    }

    pub fn assigned_to_another_user() -> Self {
        CouponError::AssignedToAnotherUser
    }

    pub fn already_used(code: CouponCode) -> Self {
        CouponError::AlreadyUsed { code }
    }

    pub fn calculation_integrity() -> Self {
        CouponError::CalculationIntegrity
    }

    pub fn store(message: impl Into<String>) -> Self {
        CouponError::Store(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CouponError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            CouponError::AlreadyApplied { .. } => ErrorCode::CouponAlreadyApplied,
            CouponError::SessionLocked => ErrorCode::SessionLocked,
            CouponError::NotFound { .. } => ErrorCode::CouponNotFound,
            CouponError::Expired { .. } => ErrorCode::CouponExpired,
            CouponError::UsageLimitReached { .. } => ErrorCode::UsageLimitReached,
            CouponError::PlanNotEligible { .. } => ErrorCode::PlanNotEligible,
            CouponError::SignInRequired => ErrorCode::SignInRequired,
            CouponError::AssignedToAnotherUser => ErrorCode::AssignedToAnotherUser,
            CouponError::AlreadyUsed { .. } => ErrorCode::CouponAlreadyUsed,
            CouponError::CalculationIntegrity => ErrorCode::CalculationIntegrity,
            CouponError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Returns the user-facing message, rendered verbatim by the UI.
    pub fn message(&self) -> String {
        match self {
            CouponError::InvalidInput { message } => message.clone(),
            CouponError::AlreadyApplied { active_code } => format!(
                "Coupon {} is already applied. Remove it before trying another code.",
                active_code
            ),
            CouponError::SessionLocked => {
                "Payment is in progress. The coupon can no longer be changed.".to_string()
            }
            CouponError::NotFound { .. } => "Invalid or expired code.".to_string(),
            CouponError::Expired { code, .. } => {
                format!("Code {} has expired.", code)
            }
            CouponError::UsageLimitReached { code, .. } => {
                format!("Code {} has reached its usage limit.", code)
            }
            CouponError::PlanNotEligible { code, plan } => {
                format!("Code {} is not valid for the {} plan.", code, plan)
            }
            CouponError::SignInRequired => {
                "Sign in to use this code.".to_string()
            }
            CouponError::AssignedToAnotherUser => {
                "This code is assigned to another user.".to_string()
            }
            CouponError::AlreadyUsed { code } => {
                format!("Code {} has already been used.", code)
            }
            CouponError::CalculationIntegrity => {
                "The discount could not be applied. Please contact support.".to_string()
            }
            // Generic wording only; the stored detail goes to logs.
            CouponError::Store(_) => {
                "Something went wrong while checking the code. Please try again.".to_string()
            }
        }
    }
}

impl std::fmt::Display for CouponError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CouponError {}

impl From<ValidationError> for CouponError {
    fn from(err: ValidationError) -> Self {
        CouponError::invalid_input(err.to_string())
    }
}

impl From<DomainError> for CouponError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StoreError => CouponError::Store(err.message),
            ErrorCode::CalculationIntegrity => CouponError::CalculationIntegrity,
            _ => CouponError::Store(err.to_string()),
        }
    }
}

impl From<CouponError> for DomainError {
    fn from(err: CouponError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
