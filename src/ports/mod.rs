//! Ports - contracts between the engine and its collaborators.
//!
//! The engine owns no persistence or network protocol. Everything it
//! reads or writes goes through these traits; adapters implement them.

mod coupon_store;
mod session_store;

pub use coupon_store::{CouponStore, SubscriptionSnapshot, UsageRecord};
pub use session_store::{SessionStore, COUPON_SESSION_KEY};
