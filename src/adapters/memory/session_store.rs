//! In-memory session store implementation for testing.
//!
//! Stands in for the device-local storage slot. Holds at most one
//! serialized session, like the real storage key does.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::coupon::CouponSession;
use crate::domain::foundation::DomainError;
use crate::ports::SessionStore;

/// In-memory session store for testing.
///
/// Sessions are stored as JSON, round-tripping through the same wire
/// format the frontend persists.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned. This is
/// acceptable for test code but this adapter should NOT be used in
/// production.
pub struct InMemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the raw serialized session (for wire-format assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .expect("InMemorySessionStore: lock poisoned")
            .clone()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<CouponSession>, DomainError> {
        let slot = self
            .slot
            .lock()
            .expect("InMemorySessionStore: lock poisoned");
        match slot.as_deref() {
            Some(json) => {
                let session = serde_json::from_str(json)
                    .map_err(|e| DomainError::store(format!("corrupt session: {e}")))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session: &CouponSession) -> Result<(), DomainError> {
        let json = serde_json::to_string(session)
            .map_err(|e| DomainError::store(format!("session serialization failed: {e}")))?;
        *self
            .slot
            .lock()
            .expect("InMemorySessionStore: lock poisoned") = Some(json);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self
            .slot
            .lock()
            .expect("InMemorySessionStore: lock poisoned") = None;
        Ok(())
    }
}
