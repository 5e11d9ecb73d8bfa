//! Catalog module - plans and their canonical prices.
//!
//! # Module Structure
//!
//! - `plan` - PlanType enum and wire names
//! - `pricing` - PricingTable, the single source of truth for money math

mod plan;
mod pricing;

pub use plan::PlanType;
pub use pricing::{standard_pricing, PricingTable};
