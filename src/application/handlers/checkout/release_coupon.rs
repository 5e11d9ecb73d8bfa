//! ReleaseCouponHandler - removes the applied coupon from a checkout.
//!
//! The user can drop a coupon any time before payment starts. Once the
//! session is locked the quote is pinned and release is refused.

use std::sync::Arc;

use tracing::debug;

use crate::domain::coupon::{CouponError, CouponSession};
use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Command to release the currently applied coupon.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseCouponCommand {
    pub now: Timestamp,
}

/// Result of a release attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseCouponResult {
    /// True when an active session was actually removed. False means
    /// there was nothing to release, which is not an error.
    pub released: bool,
}

/// Handler for releasing an applied coupon.
pub struct ReleaseCouponHandler {
    session_store: Arc<dyn SessionStore>,
    session_ttl_minutes: i64,
}

impl ReleaseCouponHandler {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            session_store,
            session_ttl_minutes: CouponSession::DEFAULT_TTL_MINUTES,
        }
    }

    /// Overrides the session time-to-live.
    pub fn with_session_ttl_minutes(mut self, minutes: i64) -> Self {
        self.session_ttl_minutes = minutes;
        self
    }

    pub async fn handle(
        &self,
        cmd: ReleaseCouponCommand,
    ) -> Result<ReleaseCouponResult, CouponError> {
        let session = match self.session_store.load().await? {
            Some(session) => session,
            None => return Ok(ReleaseCouponResult { released: false }),
        };

        if session.is_locked() {
            return Err(CouponError::session_locked());
        }

        // Expired sessions are cleared too, but they no longer count as
        // an applied coupon.
        let was_fresh = !session.is_expired(cmd.now, self.session_ttl_minutes);
        self.session_store.clear().await?;
        if was_fresh {
            debug!("coupon released by user");
        } else {
            debug!("stale coupon session dropped on release");
        }

        Ok(ReleaseCouponResult { released: was_fresh })
    }
}
