//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "percentage",
                0,
                100,
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
