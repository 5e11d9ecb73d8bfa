//! Checkout flow handlers: validate, release, and record coupons.

mod record_usage;
mod release_coupon;
mod validate_coupon;

pub use record_usage::{
    RecordCouponUsageCommand, RecordCouponUsageHandler, RecordCouponUsageResult,
};
pub use release_coupon::{ReleaseCouponCommand, ReleaseCouponHandler, ReleaseCouponResult};
pub use validate_coupon::{ValidateCouponCommand, ValidateCouponHandler, ValidateCouponResult};
