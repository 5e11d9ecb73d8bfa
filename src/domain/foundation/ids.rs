//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponId(Uuid);

impl CouponId {
    /// Creates a new random CouponId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CouponId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CouponId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CouponId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for an active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random SubscriptionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SubscriptionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubscriptionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// User identifier (assigned by the auth collaborator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address, normalized to lowercase.
///
/// Used only to match personally-assigned coupons, so the validation is
/// intentionally shallow: non-empty with exactly one `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a new EmailAddress, normalizing case.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if email.chars().filter(|c| *c == '@').count() != 1 {
            return Err(ValidationError::invalid_format(
                "email",
                "expected exactly one '@'",
            ));
        }
        Ok(Self(email))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_id_generates_unique_values() {
        let id1 = CouponId::new();
        let id2 = CouponId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn coupon_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CouponId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn coupon_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = CouponId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn coupon_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CouponId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn subscription_id_generates_unique_values() {
        let id1 = SubscriptionId::new();
        let id2 = SubscriptionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("user-42").unwrap();
        assert_eq!(id.as_str(), "user-42");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        let result = UserId::new("");
        assert!(result.is_err());
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn user_id_displays_correctly() {
        let id = UserId::new("user-99").unwrap();
        assert_eq!(format!("{}", id), "user-99");
    }

    #[test]
    fn email_normalizes_to_lowercase() {
        let email = EmailAddress::new("Student@Example.COM").unwrap();
        assert_eq!(email.as_str(), "student@example.com");
    }

    #[test]
    fn email_trims_whitespace() {
        let email = EmailAddress::new("  a@b.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn email_rejects_empty_string() {
        assert!(EmailAddress::new("   ").is_err());
    }

    #[test]
    fn email_rejects_missing_at_sign() {
        assert!(EmailAddress::new("not-an-email").is_err());
    }

    #[test]
    fn email_rejects_multiple_at_signs() {
        assert!(EmailAddress::new("a@@b.com").is_err());
    }

    #[test]
    fn normalized_emails_compare_equal() {
        let e1 = EmailAddress::new("USER@test.com").unwrap();
        let e2 = EmailAddress::new("user@TEST.com").unwrap();
        assert_eq!(e1, e2);
    }
}
