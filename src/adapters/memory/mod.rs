//! In-memory adapters for testing.

mod coupon_store;
mod session_store;

pub use coupon_store::InMemoryCouponStore;
pub use session_store::InMemorySessionStore;
