//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Coupon eligibility errors
    CouponNotFound,
    CouponExpired,
    UsageLimitReached,
    PlanNotEligible,
    SignInRequired,
    AssignedToAnotherUser,
    CouponAlreadyUsed,

    // Session errors
    CouponAlreadyApplied,
    SessionLocked,
    InvalidStateTransition,

    // Integrity errors
    CalculationIntegrity,

    // Refund errors
    RefundIneligible,
    SubscriptionNotFound,

    // Infrastructure errors
    StoreError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::CouponNotFound => "COUPON_NOT_FOUND",
            ErrorCode::CouponExpired => "COUPON_EXPIRED",
            ErrorCode::UsageLimitReached => "USAGE_LIMIT_REACHED",
            ErrorCode::PlanNotEligible => "PLAN_NOT_ELIGIBLE",
            ErrorCode::SignInRequired => "SIGN_IN_REQUIRED",
            ErrorCode::AssignedToAnotherUser => "ASSIGNED_TO_ANOTHER_USER",
            ErrorCode::CouponAlreadyUsed => "COUPON_ALREADY_USED",
            ErrorCode::CouponAlreadyApplied => "COUPON_ALREADY_APPLIED",
            ErrorCode::SessionLocked => "SESSION_LOCKED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::CalculationIntegrity => "CALCULATION_INTEGRITY",
            ErrorCode::RefundIneligible => "REFUND_INELIGIBLE",
            ErrorCode::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a store (collaborator) error. The message is kept generic
    /// so infrastructure internals never leak to end users.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("coupon_code");
        assert_eq!(format!("{}", err), "Field 'coupon_code' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("percent", 1, 100, 150);
        assert_eq!(
            format!("{}", err),
            "Field 'percent' must be between 1 and 100, got 150"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("email", "missing @ symbol");
        assert_eq!(
            format!("{}", err),
            "Field 'email' has invalid format: missing @ symbol"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CouponNotFound, "Coupon not found");
        assert_eq!(format!("{}", err), "[COUPON_NOT_FOUND] Coupon not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "code")
            .with_detail("reason", "too long");

        assert_eq!(err.details.get("field"), Some(&"code".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"too long".to_string()));
    }

    #[test]
    fn store_error_uses_store_code() {
        let err = DomainError::store("backend unavailable");
        assert_eq!(err.code, ErrorCode::StoreError);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::CouponNotFound), "COUPON_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::SessionLocked), "SESSION_LOCKED");
        assert_eq!(
            format!("{}", ErrorCode::CalculationIntegrity),
            "CALCULATION_INTEGRITY"
        );
    }
}
