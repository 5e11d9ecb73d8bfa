//! Refund domain module.
//!
//! Prorated cancellation refunds under a statutory fee policy.
//!
//! # Module Structure
//!
//! - `policy` - RefundPolicy (fee rate, fee cap, statutory minimum)
//! - `calculator` - pure proration calculator

mod calculator;
mod policy;

pub use calculator::{calculate_refund, RefundCalculation};
pub use policy::RefundPolicy;
