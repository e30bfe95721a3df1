//! In-Memory Coupon Repository
//!
//! Keeps coupons in a map guarded by a `tokio` lock. Every write runs under
//! the write lock, so each update is atomic with respect to other calls.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::coupon::{Coupon, CouponFilter, CouponPatch};
use crate::domain::foundation::{CouponId, DomainError, ErrorCode};
use crate::ports::CouponRepository;

/// In-memory storage for coupons.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponRepository {
    coupons: Arc<RwLock<HashMap<CouponId, Coupon>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryCouponRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `coupons`. Coupons without an
    /// id get a fresh one. Seeding does not count as a write.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let map = coupons
            .into_iter()
            .map(|mut coupon| {
                let id = *coupon.id.get_or_insert_with(CouponId::new);
                (id, coupon)
            })
            .collect();

        Self {
            coupons: Arc::new(RwLock::new(map)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored coupons.
    pub async fn len(&self) -> usize {
        self.coupons.read().await.len()
    }

    /// Returns true if no coupon is stored.
    pub async fn is_empty(&self) -> bool {
        self.coupons.read().await.is_empty()
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn required_id(id: Option<CouponId>) -> Result<CouponId, DomainError> {
    id.ok_or_else(|| DomainError::new(ErrorCode::CouponIdRequired, "Coupon id is required"))
}

fn not_found(id: &CouponId) -> DomainError {
    DomainError::new(ErrorCode::CouponNotFound, "Coupon not found").with_detail("id", id.to_string())
}

fn ensure_code_free(
    coupons: &HashMap<CouponId, Coupon>,
    code: &str,
    owner: &CouponId,
) -> Result<(), DomainError> {
    let taken = coupons
        .values()
        .any(|other| other.code == code && other.id.as_ref() != Some(owner));

    if taken {
        Err(DomainError::new(
            ErrorCode::CouponCodeAlreadyExists,
            format!("Coupon code already exists: {}", code),
        )
        .with_detail("code", code))
    } else {
        Ok(())
    }
}

#[async_trait]
impl CouponRepository for InMemoryCouponRepository {
    async fn find_by_id(&self, id: &CouponId) -> Result<Option<Coupon>, DomainError> {
        let coupons = self.coupons.read().await;
        Ok(coupons.get(id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, DomainError> {
        let coupons = self.coupons.read().await;
        Ok(coupons.values().find(|coupon| coupon.code == code).cloned())
    }

    async fn find_by_filter(&self, filter: &CouponFilter) -> Result<Vec<Coupon>, DomainError> {
        let coupons = self.coupons.read().await;
        Ok(coupons
            .values()
            .filter(|coupon| filter.matches(coupon))
            .cloned()
            .collect())
    }

    async fn save(&self, coupon: &Coupon) -> Result<Coupon, DomainError> {
        let mut coupons = self.coupons.write().await;

        let mut stored = coupon.clone();
        let id = *stored.id.get_or_insert_with(CouponId::new);
        ensure_code_free(&coupons, &stored.code, &id)?;

        coupons.insert(id, stored.clone());
        self.record_write();
        Ok(stored)
    }

    async fn update(&self, patch: &CouponPatch) -> Result<Coupon, DomainError> {
        let id = required_id(patch.id)?;
        let mut coupons = self.coupons.write().await;

        let current = coupons.get(&id).ok_or_else(|| not_found(&id))?;
        let updated = patch.apply_to(current)?;
        ensure_code_free(&coupons, &updated.code, &id)?;

        coupons.insert(id, updated.clone());
        self.record_write();
        Ok(updated)
    }

    async fn update_usage(&self, coupon: &Coupon) -> Result<Coupon, DomainError> {
        let id = required_id(coupon.id)?;
        let mut coupons = self.coupons.write().await;

        let stored = coupons.get_mut(&id).ok_or_else(|| not_found(&id))?;
        stored.use_limit = coupon.use_limit;

        let updated = stored.clone();
        self.record_write();
        Ok(updated)
    }

    async fn update_applicable_categories(&self, coupon: &Coupon) -> Result<Coupon, DomainError> {
        let id = required_id(coupon.id)?;
        let mut coupons = self.coupons.write().await;

        let stored = coupons.get_mut(&id).ok_or_else(|| not_found(&id))?;
        stored.applicable_categories = coupon.applicable_categories.clone();

        let updated = stored.clone();
        self.record_write();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coupon::fixtures::active_coupon;
    use crate::domain::coupon::{CouponStatus, FieldPatch};

    #[tokio::test]
    async fn save_assigns_id_when_missing() {
        let repository = InMemoryCouponRepository::new();
        let mut coupon = active_coupon();
        coupon.id = None;

        let saved = repository.save(&coupon).await.unwrap();

        assert!(saved.id.is_some());
        assert_eq!(repository.len().await, 1);
        assert_eq!(repository.write_count(), 1);
    }

    #[tokio::test]
    async fn save_replaces_existing_coupon() {
        let coupon = active_coupon();
        let repository = InMemoryCouponRepository::with_coupons(vec![coupon.clone()]);

        let mut changed = coupon.clone();
        changed.status = CouponStatus::Inactive;
        repository.save(&changed).await.unwrap();

        let stored = repository.find_by_id(&coupon.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.status, CouponStatus::Inactive);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_code() {
        let coupon = active_coupon();
        let repository = InMemoryCouponRepository::with_coupons(vec![coupon.clone()]);

        let mut other = coupon.clone();
        other.id = None;
        let err = repository.save(&other).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CouponCodeAlreadyExists);
        assert_eq!(err.detail("code"), Some("123ABC"));
        assert_eq!(repository.write_count(), 0);
    }

    #[tokio::test]
    async fn find_by_code_returns_matching_coupon() {
        let coupon = active_coupon();
        let repository = InMemoryCouponRepository::with_coupons(vec![coupon.clone()]);

        assert_eq!(repository.find_by_code("123ABC").await.unwrap(), Some(coupon));
        assert_eq!(repository.find_by_code("NOPE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_by_filter_applies_criteria() {
        let active = active_coupon();
        let mut inactive = active_coupon();
        inactive.id = Some(CouponId::new());
        inactive.code = "OTHER".to_string();
        inactive.status = CouponStatus::Inactive;
        let repository = InMemoryCouponRepository::with_coupons(vec![active, inactive.clone()]);

        let all = repository.find_by_filter(&CouponFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let filter = CouponFilter {
            status: Some(CouponStatus::Inactive),
            ..Default::default()
        };
        let found = repository.find_by_filter(&filter).await.unwrap();
        assert_eq!(found, vec![inactive]);
    }

    #[tokio::test]
    async fn update_requires_id() {
        let repository = InMemoryCouponRepository::new();

        let err = repository.update(&CouponPatch::default()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CouponIdRequired);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let coupon = active_coupon();
        let repository = InMemoryCouponRepository::with_coupons(vec![coupon.clone()]);

        let patch = CouponPatch {
            id: coupon.id,
            name: FieldPatch::Set("Renamed".to_string()),
            use_limit: FieldPatch::Clear,
            ..Default::default()
        };
        let updated = repository.update(&patch).await.unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.use_limit, None);
        assert_eq!(updated.description, coupon.description);
        assert_eq!(updated.code, coupon.code);
    }

    #[tokio::test]
    async fn update_of_unknown_coupon_is_not_found() {
        let repository = InMemoryCouponRepository::new();
        let id = CouponId::new();
        let patch = CouponPatch {
            id: Some(id),
            ..Default::default()
        };

        let err = repository.update(&patch).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CouponNotFound);
        assert_eq!(err.detail("id"), Some(id.to_string().as_str()));
    }

    #[tokio::test]
    async fn update_usage_touches_only_use_limit() {
        let coupon = active_coupon();
        let repository = InMemoryCouponRepository::with_coupons(vec![coupon.clone()]);

        let mut changed = coupon.clone();
        changed.use_limit = Some(3);
        changed.name = "ignored".to_string();
        let updated = repository.update_usage(&changed).await.unwrap();

        assert_eq!(updated.use_limit, Some(3));
        assert_eq!(updated.name, coupon.name);
    }

    #[tokio::test]
    async fn update_categories_touches_only_categories() {
        let coupon = active_coupon();
        let repository = InMemoryCouponRepository::with_coupons(vec![coupon.clone()]);

        let mut changed = coupon.clone();
        changed.applicable_categories.clear();
        changed.use_limit = Some(0);
        let updated = repository.update_applicable_categories(&changed).await.unwrap();

        assert!(updated.applicable_categories.is_empty());
        assert_eq!(updated.use_limit, coupon.use_limit);
    }

    #[tokio::test]
    async fn single_field_updates_require_id() {
        let repository = InMemoryCouponRepository::new();
        let mut coupon = active_coupon();
        coupon.id = None;

        let err = repository.update_usage(&coupon).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponIdRequired);

        let err = repository.update_applicable_categories(&coupon).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponIdRequired);
    }
}
