//! Partial updates to a stored coupon.
//!
//! A patch distinguishes three states per field: left untouched, cleared,
//! or set to a new value. Omitting a field never erases the stored value.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};

use crate::domain::foundation::{CouponId, Timestamp};

use super::{Coupon, CouponDraft, CouponError, CouponStatus};

/// Change to a single field.
///
/// Deserializes from JSON as: missing key -> `Absent` (requires
/// `#[serde(default)]` on the field), `null` -> `Clear`, value -> `Set`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPatch<T> {
    /// Keep the stored value.
    Absent,
    /// Remove the stored value.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        FieldPatch::Absent
    }
}

impl<T> FieldPatch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldPatch::Absent)
    }

    /// Returns the new value if one is being set.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldPatch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Resolves the patch against the current value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            FieldPatch::Absent => current,
            FieldPatch::Clear => None,
            FieldPatch::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldPatch::Set(value),
            None => FieldPatch::Clear,
        }
    }
}

impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(FieldPatch::from)
    }
}

/// A set of field changes addressed to one coupon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponPatch {
    /// Coupon to update. Required by every update path.
    pub id: Option<CouponId>,
    pub name: FieldPatch<String>,
    pub description: FieldPatch<String>,
    pub discount_value: FieldPatch<f64>,
    pub discount_percentage: FieldPatch<f64>,
    pub status: FieldPatch<CouponStatus>,
    pub code: FieldPatch<String>,
    pub expiration_date: FieldPatch<Timestamp>,
    pub responsible_user: FieldPatch<String>,
    pub use_limit: FieldPatch<u32>,
    pub applicable_categories: FieldPatch<BTreeSet<String>>,
}

impl CouponPatch {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.description.is_absent()
            && self.discount_value.is_absent()
            && self.discount_percentage.is_absent()
            && self.status.is_absent()
            && self.code.is_absent()
            && self.expiration_date.is_absent()
            && self.responsible_user.is_absent()
            && self.use_limit.is_absent()
            && self.applicable_categories.is_absent()
    }

    /// Produces the candidate that results from applying this patch to
    /// `stored`. The stored id is kept.
    pub fn merge_onto(&self, stored: &Coupon) -> CouponDraft {
        let patch = self.clone();
        CouponDraft {
            id: stored.id,
            name: patch.name.apply(Some(stored.name.clone())),
            description: patch.description.apply(Some(stored.description.clone())),
            discount_value: patch.discount_value.apply(stored.discount_value),
            discount_percentage: patch.discount_percentage.apply(stored.discount_percentage),
            status: patch.status.apply(Some(stored.status)),
            code: patch.code.apply(Some(stored.code.clone())),
            expiration_date: patch.expiration_date.apply(Some(stored.expiration_date)),
            responsible_user: patch.responsible_user.apply(stored.responsible_user.clone()),
            use_limit: patch.use_limit.apply(stored.use_limit),
            applicable_categories: patch
                .applicable_categories
                .apply(Some(stored.applicable_categories.clone()))
                .unwrap_or_default(),
        }
    }

    /// Applies this patch to `stored`, returning the updated entity.
    ///
    /// # Errors
    ///
    /// Fails if the patch clears a required field.
    pub fn apply_to(&self, stored: &Coupon) -> Result<Coupon, CouponError> {
        self.merge_onto(stored).into_coupon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coupon::fixtures::active_coupon;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        description: FieldPatch<String>,
        #[serde(default)]
        use_limit: FieldPatch<u32>,
    }

    #[test]
    fn missing_key_deserializes_as_absent() {
        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.description, FieldPatch::Absent);
    }

    #[test]
    fn null_deserializes_as_clear() {
        let payload: Payload = serde_json::from_str(r#"{"use_limit": null}"#).unwrap();
        assert_eq!(payload.use_limit, FieldPatch::Clear);
    }

    #[test]
    fn value_deserializes_as_set() {
        let payload: Payload = serde_json::from_str(r#"{"description": "D2"}"#).unwrap();
        assert_eq!(payload.description, FieldPatch::Set("D2".to_string()));
    }

    #[test]
    fn field_patch_apply_resolves_each_state() {
        assert_eq!(FieldPatch::Absent.apply(Some(1)), Some(1));
        assert_eq!(FieldPatch::<i32>::Clear.apply(Some(1)), None);
        assert_eq!(FieldPatch::Set(2).apply(Some(1)), Some(2));
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let mut stored = active_coupon();
        stored.description = "D1".to_string();

        let patch = CouponPatch {
            id: stored.id,
            name: FieldPatch::Set("Renamed".to_string()),
            ..Default::default()
        };

        let merged = patch.merge_onto(&stored);
        assert_eq!(merged.description.as_deref(), Some("D1"));
        assert_eq!(merged.name.as_deref(), Some("Renamed"));
    }

    #[test]
    fn merge_clears_optional_fields() {
        let mut stored = active_coupon();
        stored.responsible_user = Some("ops".to_string());

        let patch = CouponPatch {
            responsible_user: FieldPatch::Clear,
            ..Default::default()
        };

        assert_eq!(patch.merge_onto(&stored).responsible_user, None);
    }

    #[test]
    fn merge_keeps_stored_id() {
        let stored = active_coupon();
        let patch = CouponPatch {
            id: Some(CouponId::new()),
            ..Default::default()
        };
        assert_eq!(patch.merge_onto(&stored).id, stored.id);
    }

    #[test]
    fn apply_rejects_clearing_required_field() {
        let stored = active_coupon();
        let patch = CouponPatch {
            name: FieldPatch::Clear,
            ..Default::default()
        };
        assert_eq!(
            patch.apply_to(&stored),
            Err(CouponError::field_cannot_be_empty(["name"]))
        );
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(CouponPatch::default().is_empty());
        let patch = CouponPatch {
            use_limit: FieldPatch::Set(3),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
