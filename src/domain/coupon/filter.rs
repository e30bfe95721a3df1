//! Coupon search criteria.

use chrono::NaiveDate;

use crate::domain::foundation::{CouponId, Timestamp};

use super::{Coupon, CouponStatus};

/// Inclusive expiration window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationDateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl ExpirationDateRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns true if `at` lies within the window, bounds included.
    pub fn contains(&self, at: Timestamp) -> bool {
        !at.is_before(&self.start) && !at.is_after(&self.end)
    }
}

/// Criteria for listing coupons. Every present field must match
/// (logical AND); an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponFilter {
    pub id: Option<CouponId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub status: Option<CouponStatus>,
    pub code: Option<String>,
    pub responsible_user: Option<String>,
    /// Calendar day (UTC) on which the coupon expires.
    pub expiration_date: Option<NaiveDate>,
    pub expiration_range: Option<ExpirationDateRange>,
}

impl CouponFilter {
    /// Returns true if no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == CouponFilter::default()
    }

    /// Returns true if `coupon` satisfies every present criterion.
    pub fn matches(&self, coupon: &Coupon) -> bool {
        fn check<T, F>(criterion: &Option<T>, test: F) -> bool
        where
            F: FnOnce(&T) -> bool,
        {
            criterion.as_ref().map_or(true, test)
        }

        check(&self.id, |id| coupon.id.as_ref() == Some(id))
            && check(&self.name, |name| &coupon.name == name)
            && check(&self.description, |d| &coupon.description == d)
            && check(&self.discount_value, |v| coupon.discount_value == Some(*v))
            && check(&self.discount_percentage, |p| {
                coupon.discount_percentage == Some(*p)
            })
            && check(&self.status, |status| coupon.status == *status)
            && check(&self.code, |code| &coupon.code == code)
            && check(&self.responsible_user, |user| {
                coupon.responsible_user.as_ref() == Some(user)
            })
            && check(&self.expiration_date, |day| coupon.expiration_date.date() == *day)
            && check(&self.expiration_range, |range| {
                range.contains(coupon.expiration_date)
            })
    }
}
