//! Coupon candidate awaiting validation.

use std::collections::BTreeSet;

use crate::domain::foundation::{CouponId, Timestamp};

use super::{Coupon, CouponError, CouponStatus};

/// An unvalidated coupon, as submitted by a caller or produced by merging
/// an update onto a stored coupon.
///
/// Every field may be missing; the validator decides which omissions are
/// acceptable and [`CouponDraft::into_coupon`] turns a complete draft into
/// an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponDraft {
    pub id: Option<CouponId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub status: Option<CouponStatus>,
    pub code: Option<String>,
    pub expiration_date: Option<Timestamp>,
    pub responsible_user: Option<String>,
    pub use_limit: Option<u32>,
    pub applicable_categories: BTreeSet<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

impl CouponDraft {
    /// Returns the names of every required field that is missing or blank,
    /// in declaration order.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if is_blank(&self.name) {
            empty.push("name");
        }
        if is_blank(&self.description) {
            empty.push("description");
        }
        if self.expiration_date.is_none() {
            empty.push("expirationDate");
        }
        if is_blank(&self.code) {
            empty.push("code");
        }
        empty
    }

    /// Converts a complete draft into a coupon entity.
    ///
    /// # Errors
    ///
    /// - `FieldCannotBeEmpty` if a required field is missing
    /// - `StatusRequired` if no status was set
    pub fn into_coupon(self) -> Result<Coupon, CouponError> {
        let empty = self.empty_fields();
        if !empty.is_empty() {
            return Err(CouponError::field_cannot_be_empty(empty));
        }

        match (self.name, self.description, self.code, self.expiration_date, self.status) {
            (Some(name), Some(description), Some(code), Some(expiration_date), Some(status)) => {
                Ok(Coupon {
                    id: self.id,
                    name,
                    description,
                    discount_value: self.discount_value,
                    discount_percentage: self.discount_percentage,
                    status,
                    code,
                    expiration_date,
                    responsible_user: self.responsible_user,
                    use_limit: self.use_limit,
                    applicable_categories: self.applicable_categories,
                })
            }
            (.., None) => Err(CouponError::StatusRequired),
            _ => Err(CouponError::field_cannot_be_empty(["name", "description", "expirationDate", "code"])),
        }
    }
}

impl From<Coupon> for CouponDraft {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id,
            name: Some(coupon.name),
            description: Some(coupon.description),
            discount_value: coupon.discount_value,
            discount_percentage: coupon.discount_percentage,
            status: Some(coupon.status),
            code: Some(coupon.code),
            expiration_date: Some(coupon.expiration_date),
            responsible_user: coupon.responsible_user,
            use_limit: coupon.use_limit,
            applicable_categories: coupon.applicable_categories,
        }
    }
}
