//! Coupon aggregate entity.
//!
//! A coupon is a discount-bearing entity identified by a unique redemption
//! code, valid until its expiration date and optionally limited in uses.
//!
//! # Design Decisions
//!
//! - **Store-assigned id**: `id` is `None` until the coupon is first saved
//! - **Derived expiry**: a coupon is expired when flagged so or when its
//!   expiration date has been reached, whichever comes first
//! - **Untracked uses are unlimited**: `use_limit = None` never blocks redemption

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CouponId, Timestamp};

use super::CouponStatus;

/// Coupon aggregate - a persisted promotional coupon.
///
/// # Invariants
///
/// - `id` never changes once assigned
/// - `code` is unique across coupons (checked at creation)
/// - At least one of `discount_value` / `discount_percentage` is set,
///   and neither is negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Store-assigned identifier.
    pub id: Option<CouponId>,

    /// Display name.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Absolute monetary discount.
    pub discount_value: Option<f64>,

    /// Percentage discount.
    pub discount_percentage: Option<f64>,

    /// Lifecycle status.
    pub status: CouponStatus,

    /// Unique redemption token.
    pub code: String,

    /// Moment after which the coupon can no longer be redeemed.
    pub expiration_date: Timestamp,

    /// Free-text attribution.
    pub responsible_user: Option<String>,

    /// Remaining uses; `None` means uses are not tracked.
    pub use_limit: Option<u32>,

    /// Category identifiers this coupon applies to.
    pub applicable_categories: BTreeSet<String>,
}

impl Coupon {
    /// Returns true if the coupon is flagged expired or its expiration date
    /// is not strictly after `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.status == CouponStatus::Expired || !self.expiration_date.is_after(&now)
    }

    /// Returns true if the coupon has been deactivated.
    pub fn is_inactive(&self) -> bool {
        self.status == CouponStatus::Inactive
    }

    /// Returns true if at least one use remains.
    pub fn has_available_uses(&self) -> bool {
        self.use_limit.map_or(true, |remaining| remaining > 0)
    }

    /// Marks the coupon inactive.
    pub fn deactivate(&mut self) {
        self.status = CouponStatus::Inactive;
    }

    /// Consumes one use.
    ///
    /// Returns false when uses are not tracked, in which case nothing changes.
    pub fn consume_use(&mut self) -> bool {
        match self.use_limit {
            Some(remaining) => {
                self.use_limit = Some(remaining.saturating_sub(1));
                true
            }
            None => false,
        }
    }

    /// Returns true if `category_id` is one of the applicable categories.
    pub fn applies_to_category(&self, category_id: &str) -> bool {
        self.applicable_categories.contains(category_id)
    }

    /// Adds an applicable category. Returns false if it was already present.
    pub fn add_applicable_category(&mut self, category_id: impl Into<String>) -> bool {
        self.applicable_categories.insert(category_id.into())
    }

    /// Removes an applicable category. Returns false if it was not present.
    pub fn remove_applicable_category(&mut self, category_id: &str) -> bool {
        self.applicable_categories.remove(category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coupon::fixtures::active_coupon;

    #[test]
    fn active_coupon_in_the_future_is_not_expired() {
        let coupon = active_coupon();
        assert!(!coupon.is_expired(Timestamp::now()));
    }

    #[test]
    fn coupon_with_expired_status_is_expired() {
        let mut coupon = active_coupon();
        coupon.status = CouponStatus::Expired;
        assert!(coupon.is_expired(Timestamp::now()));
    }

    #[test]
    fn coupon_is_expired_when_expiration_date_is_reached() {
        let coupon = active_coupon();
        assert!(coupon.is_expired(coupon.expiration_date));
        assert!(coupon.is_expired(coupon.expiration_date.plus_secs(1)));
        assert!(!coupon.is_expired(coupon.expiration_date.plus_secs(-1)));
    }

    #[test]
    fn inactive_status_is_inactive() {
        let mut coupon = active_coupon();
        assert!(!coupon.is_inactive());
        coupon.deactivate();
        assert!(coupon.is_inactive());
        assert_eq!(coupon.status, CouponStatus::Inactive);
    }

    #[test]
    fn available_uses_follow_use_limit() {
        let mut coupon = active_coupon();

        coupon.use_limit = Some(1);
        assert!(coupon.has_available_uses());

        coupon.use_limit = Some(0);
        assert!(!coupon.has_available_uses());

        coupon.use_limit = None;
        assert!(coupon.has_available_uses());
    }

    #[test]
    fn consume_use_decrements_by_exactly_one() {
        let mut coupon = active_coupon();
        coupon.use_limit = Some(5);

        assert!(coupon.consume_use());
        assert_eq!(coupon.use_limit, Some(4));
    }

    #[test]
    fn consume_use_leaves_untracked_coupon_unchanged() {
        let mut coupon = active_coupon();
        coupon.use_limit = None;

        assert!(!coupon.consume_use());
        assert_eq!(coupon.use_limit, None);
    }

    #[test]
    fn categories_behave_as_a_set() {
        let mut coupon = active_coupon();
        coupon.applicable_categories.clear();

        assert!(coupon.add_applicable_category("books"));
        assert!(!coupon.add_applicable_category("books"));
        assert!(coupon.applies_to_category("books"));
        assert_eq!(coupon.applicable_categories.len(), 1);

        assert!(coupon.remove_applicable_category("books"));
        assert!(!coupon.remove_applicable_category("books"));
        assert!(coupon.applicable_categories.is_empty());
    }
}
