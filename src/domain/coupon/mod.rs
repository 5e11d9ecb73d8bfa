//! Coupon domain module.
//!
//! Handles discount codes: the code value object, the read-only coupon
//! record, the pure discount calculator, the checkout session guard and
//! the coupon error taxonomy.
//!
//! # Module Structure
//!
//! - `code` - CouponCode value object (case-insensitive, stored uppercase)
//! - `coupon` - Coupon record and eligibility helpers
//! - `discount` - DiscountRule and the pure discount calculator
//! - `session` - CouponSession state machine (stacking/lock guard)
//! - `errors` - CouponError with user-facing messages

mod code;
mod coupon;
mod discount;
mod errors;
mod session;

pub use code::CouponCode;
pub use coupon::{AssignmentCheck, Coupon, CouponAssignment, CouponSummary};
pub use discount::{compute_discount, DiscountKind, DiscountResult, DiscountRule};
pub use errors::CouponError;
pub use session::{CouponSession, SessionGuardDecision, SessionState};
