//! Domain layer - pure business logic, no I/O.

pub mod catalog;
pub mod coupon;
pub mod foundation;
pub mod refund;
