//! Coupon domain module.
//!
//! Holds the coupon entity, its business rules, and the value types used to
//! create, update and search coupons.
//!
//! # Module Structure
//!
//! - `aggregate` - Coupon entity and derived predicates
//! - `status` - CouponStatus enumeration
//! - `draft` - Unvalidated coupon candidate
//! - `patch` - Partial update with absent/clear/set fields
//! - `filter` - Search criteria
//! - `validator` - Stateless rule checks
//! - `errors` - CouponError and its stable codes

mod aggregate;
mod draft;
mod errors;
mod filter;
mod patch;
mod status;
pub mod validator;

pub use aggregate::Coupon;
pub use draft::CouponDraft;
pub use errors::{CouponError, CouponErrorCode};
pub use filter::{CouponFilter, ExpirationDateRange};
pub use patch::{CouponPatch, FieldPatch};
pub use status::CouponStatus;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeSet;

    use super::{Coupon, CouponDraft, CouponStatus};
    use crate::domain::foundation::{CouponId, Timestamp};

    fn categories() -> BTreeSet<String> {
        ["category1", "category2", "category3"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// A stored, redeemable coupon expiring in five days.
    pub fn active_coupon() -> Coupon {
        Coupon {
            id: Some(CouponId::new()),
            name: "Grouper test".to_string(),
            description: "Coupon used in tests".to_string(),
            discount_value: Some(1.0),
            discount_percentage: Some(1.0),
            status: CouponStatus::Active,
            code: "123ABC".to_string(),
            expiration_date: Timestamp::now().plus_days(5),
            responsible_user: None,
            use_limit: Some(10),
            applicable_categories: categories(),
        }
    }

    /// A complete, not yet stored candidate.
    pub fn valid_draft() -> CouponDraft {
        CouponDraft {
            id: None,
            name: Some("Grouper test".to_string()),
            description: Some("Coupon used in tests".to_string()),
            discount_value: Some(1.0),
            discount_percentage: Some(1.0),
            status: Some(CouponStatus::Active),
            code: Some("123ABC".to_string()),
            expiration_date: Some(Timestamp::now().plus_days(5)),
            responsible_user: None,
            use_limit: Some(10),
            applicable_categories: categories(),
        }
    }
}
