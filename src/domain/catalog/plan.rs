//! Plan type definitions.
//!
//! Represents the subscription plan lengths sold by the platform.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Subscription plan length.
///
/// Surfaced externally under the wire names `day`, `week`, `month` and
/// `3months`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    /// Single-day access pass.
    #[serde(rename = "day")]
    Daily,

    /// One week of access.
    #[serde(rename = "week")]
    Weekly,

    /// One month of access.
    #[serde(rename = "month")]
    Monthly,

    /// Three months of access at a package rate.
    #[serde(rename = "3months")]
    Quarterly,
}

impl PlanType {
    /// All plan types, in ascending length order.
    pub const ALL: [PlanType; 4] = [
        PlanType::Daily,
        PlanType::Weekly,
        PlanType::Monthly,
        PlanType::Quarterly,
    ];

    /// Returns the wire name used by external collaborators.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PlanType::Daily => "day",
            PlanType::Weekly => "week",
            PlanType::Monthly => "month",
            PlanType::Quarterly => "3months",
        }
    }

    /// Parses a wire name into a plan type.
    pub fn from_wire(name: &str) -> Result<Self, ValidationError> {
        match name {
            "day" => Ok(PlanType::Daily),
            "week" => Ok(PlanType::Weekly),
            "month" => Ok(PlanType::Monthly),
            "3months" => Ok(PlanType::Quarterly),
            other => Err(ValidationError::invalid_format(
                "plan_type",
                format!("unknown plan '{}'", other),
            )),
        }
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanType::Daily => "Daily",
            PlanType::Weekly => "Weekly",
            PlanType::Monthly => "Monthly",
            PlanType::Quarterly => "Quarterly",
        }
    }

    /// Daily passes are consumed immediately and are never refundable.
    pub fn is_daily(&self) -> bool {
        matches!(self, PlanType::Daily)
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
