//! Coupon repository port.
//!
//! Defines the contract for persisting and retrieving coupons.
//!
//! # Design
//!
//! - **Store-assigned ids**: `save` returns the stored entity with its id
//! - **Conditional updates**: the `update*` family targets one coupon by id
//!   and must apply its changes atomically, returning the post-update state
//! - **Fail fast on missing id**: every `update*` call with no id fails with
//!   `CouponIdRequired` before touching the store
//!
//! # Example
//!
//! ```ignore
//! async fn redeem(repo: &dyn CouponRepository, id: &CouponId) -> Result<Coupon, DomainError> {
//!     let mut coupon = repo
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| DomainError::new(ErrorCode::CouponNotFound, "Coupon not found"))?;
//!     coupon.consume_use();
//!     repo.update_usage(&coupon).await
//! }
//! ```

use async_trait::async_trait;

use crate::domain::coupon::{Coupon, CouponFilter, CouponPatch};
use crate::domain::foundation::{CouponId, DomainError};

/// Repository port for coupon persistence.
///
/// Implementations must ensure:
/// - Unique `code` across coupons
/// - Single-document atomicity for every write
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Find a coupon by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &CouponId) -> Result<Option<Coupon>, DomainError>;

    /// Find a coupon by its redemption code. Returns `None` if not found.
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, DomainError>;

    /// Find every coupon matching the filter. Order is unspecified.
    async fn find_by_filter(&self, filter: &CouponFilter) -> Result<Vec<Coupon>, DomainError>;

    /// Insert or fully replace a coupon, assigning an id when absent.
    ///
    /// # Errors
    ///
    /// - `CouponCodeAlreadyExists` if another coupon uses the same code
    /// - `DatabaseError` on persistence failure
    async fn save(&self, coupon: &Coupon) -> Result<Coupon, DomainError>;

    /// Apply the fields carried by `patch` to the coupon it addresses.
    ///
    /// # Errors
    ///
    /// - `CouponIdRequired` if `patch.id` is `None`
    /// - `CouponNotFound` if no coupon has that id
    /// - `DatabaseError` on persistence failure
    async fn update(&self, patch: &CouponPatch) -> Result<Coupon, DomainError>;

    /// Persist only `use_limit`.
    ///
    /// # Errors
    ///
    /// Same as [`CouponRepository::update`].
    async fn update_usage(&self, coupon: &Coupon) -> Result<Coupon, DomainError>;

    /// Persist only `applicable_categories`.
    ///
    /// # Errors
    ///
    /// Same as [`CouponRepository::update`].
    async fn update_applicable_categories(&self, coupon: &Coupon) -> Result<Coupon, DomainError>;
}
