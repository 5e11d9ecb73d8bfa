//! Coupon code value object.
//!
//! Codes are free-text, matched case-insensitively, and stored uppercase.
//!
//! # Validation Rules
//!
//! - Not empty after trimming
//! - At most 64 characters
//! - No interior whitespace

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};

/// A validated, uppercase coupon code.
///
/// # Example
///
/// ```ignore
/// let code = CouponCode::try_new("save20")?;
/// assert_eq!(code.as_str(), "SAVE20");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponCode(String);

impl CouponCode {
    /// Maximum accepted code length.
    pub const MAX_LEN: usize = 64;

    /// Creates a new CouponCode, trimming and upper-casing the input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the trimmed code is empty, longer
    /// than [`Self::MAX_LEN`], or contains whitespace.
    pub fn try_new(code: &str) -> Result<Self, ValidationError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("coupon_code"));
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(ValidationError::out_of_range(
                "coupon_code_length",
                1,
                Self::MAX_LEN as i64,
                trimmed.len() as i64,
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "coupon_code",
                "whitespace is not allowed inside a code",
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalized code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CouponCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CouponCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}
