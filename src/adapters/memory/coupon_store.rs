//! In-memory coupon store implementation for testing.
//!
//! Deterministic store for unit and integration tests. The usage
//! compare-and-increment runs under one lock so the concurrency
//! contract of the port holds even here.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned. Production code should use a database-backed
//! store.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::coupon::{Coupon, CouponCode};
use crate::domain::foundation::{CouponId, DomainError, UserId};
use crate::ports::{CouponStore, SubscriptionSnapshot, UsageRecord};

/// In-memory coupon store for testing.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned. This is
/// acceptable for test code but this adapter should NOT be used in
/// production.
pub struct InMemoryCouponStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    coupons: Vec<Coupon>,
    usages: Vec<UsageRecord>,
    subscriptions: Vec<SubscriptionSnapshot>,
}

impl InMemoryCouponStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Seeds a coupon.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert_coupon(&self, coupon: Coupon) {
        self.lock().coupons.push(coupon);
    }

    /// Seeds a subscription.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert_subscription(&self, snapshot: SubscriptionSnapshot) {
        self.lock().subscriptions.push(snapshot);
    }

    /// Returns all recorded usages (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn usages(&self) -> Vec<UsageRecord> {
        self.lock().usages.clone()
    }

    /// Returns a coupon's current usage counter.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn used_count(&self, coupon_id: CouponId) -> Option<u32> {
        self.lock()
            .coupons
            .iter()
            .find(|c| c.id == coupon_id)
            .map(|c| c.used_count)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .expect("InMemoryCouponStore: lock poisoned")
    }
}

impl Default for InMemoryCouponStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CouponStore for InMemoryCouponStore {
    async fn find_coupon_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, DomainError> {
        Ok(self.lock().coupons.iter().find(|c| &c.code == code).cloned())
    }

    async fn find_usage(
        &self,
        coupon_id: CouponId,
        user_id: &UserId,
    ) -> Result<Option<UsageRecord>, DomainError> {
        Ok(self
            .lock()
            .usages
            .iter()
            .find(|u| u.coupon_id == coupon_id && &u.user_id == user_id)
            .cloned())
    }

    async fn atomic_record_usage(&self, record: UsageRecord) -> Result<(), DomainError> {
        // Counter check, increment and row insert under one guard.
        let mut inner = self.lock();
        let coupon = inner
            .coupons
            .iter_mut()
            .find(|c| c.id == record.coupon_id)
            .ok_or_else(|| DomainError::store("coupon disappeared during redemption"))?;
        if coupon.is_exhausted() {
            return Err(DomainError::store("usage limit reached during commit"));
        }
        coupon.used_count += 1;
        inner.usages.push(record);
        Ok(())
    }

    async fn find_active_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionSnapshot>, DomainError> {
        Ok(self
            .lock()
            .subscriptions
            .iter()
            .find(|s| &s.user_id == user_id)
            .cloned())
    }
}
