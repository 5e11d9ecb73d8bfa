//! Session store port.
//!
//! The coupon session is the only locally persisted state the engine
//! owns. It lives under a fixed storage key on the user's device (local
//! storage in the web frontend); this trait is the injected seam so the
//! state machine stays testable without any storage.

use async_trait::async_trait;

use crate::domain::coupon::CouponSession;
use crate::domain::foundation::DomainError;

/// Fixed storage key for the serialized coupon session.
pub const COUPON_SESSION_KEY: &str = "coupon_session";

/// Port for persisting the device-local coupon session.
///
/// Implementations hold at most one session. TTL expiry is the domain's
/// job (checked lazily on read through `CouponSession::fresh`), not the
/// store's.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session, if any.
    async fn load(&self) -> Result<Option<CouponSession>, DomainError>;

    /// Saves the session, replacing any existing one.
    async fn save(&self, session: &CouponSession) -> Result<(), DomainError>;

    /// Clears the stored session.
    async fn clear(&self) -> Result<(), DomainError>;
}
