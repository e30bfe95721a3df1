//! HTTP DTOs for coupon endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.
//! JSON field names are camelCase.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::coupon::{
    Coupon, CouponDraft, CouponError, CouponFilter, CouponPatch, CouponStatus,
    ExpirationDateRange, FieldPatch,
};
use crate::domain::foundation::{CouponId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a coupon. Every field is optional at this layer; the
/// validator reports what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub status: Option<CouponStatus>,
    pub code: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub responsible_user: Option<String>,
    pub use_limit: Option<u32>,
    #[serde(default)]
    pub applicable_categories: Vec<String>,
}

impl From<CreateCouponRequest> for CouponDraft {
    fn from(req: CreateCouponRequest) -> Self {
        Self {
            id: None,
            name: req.name,
            description: req.description,
            discount_value: req.discount_value,
            discount_percentage: req.discount_percentage,
            status: req.status,
            code: req.code,
            expiration_date: req.expiration_date.map(Timestamp::from_datetime),
            responsible_user: req.responsible_user,
            use_limit: req.use_limit,
            applicable_categories: req.applicable_categories.into_iter().collect(),
        }
    }
}

/// Request to update a coupon.
///
/// A missing key leaves the stored value untouched; an explicit `null`
/// clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponRequest {
    #[serde(default)]
    pub id: Option<CouponId>,
    #[serde(default)]
    pub name: FieldPatch<String>,
    #[serde(default)]
    pub description: FieldPatch<String>,
    #[serde(default)]
    pub discount_value: FieldPatch<f64>,
    #[serde(default)]
    pub discount_percentage: FieldPatch<f64>,
    #[serde(default)]
    pub status: FieldPatch<CouponStatus>,
    #[serde(default)]
    pub code: FieldPatch<String>,
    #[serde(default)]
    pub expiration_date: FieldPatch<DateTime<Utc>>,
    #[serde(default)]
    pub responsible_user: FieldPatch<String>,
    #[serde(default)]
    pub use_limit: FieldPatch<u32>,
    #[serde(default)]
    pub applicable_categories: FieldPatch<BTreeSet<String>>,
}

impl From<UpdateCouponRequest> for CouponPatch {
    fn from(req: UpdateCouponRequest) -> Self {
        let expiration_date = match req.expiration_date {
            FieldPatch::Absent => FieldPatch::Absent,
            FieldPatch::Clear => FieldPatch::Clear,
            FieldPatch::Set(at) => FieldPatch::Set(Timestamp::from_datetime(at)),
        };

        Self {
            id: req.id,
            name: req.name,
            description: req.description,
            discount_value: req.discount_value,
            discount_percentage: req.discount_percentage,
            status: req.status,
            code: req.code,
            expiration_date,
            responsible_user: req.responsible_user,
            use_limit: req.use_limit,
            applicable_categories: req.applicable_categories,
        }
    }
}

/// Query-string filter for listing coupons.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponFilterQuery {
    pub id: Option<CouponId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub status: Option<CouponStatus>,
    pub code: Option<String>,
    pub responsible_user: Option<String>,
    /// Calendar day, `YYYY-MM-DD`.
    pub expiration_date: Option<NaiveDate>,
    pub expiration_date_start: Option<DateTime<Utc>>,
    pub expiration_date_end: Option<DateTime<Utc>>,
}

impl From<CouponFilterQuery> for CouponFilter {
    fn from(query: CouponFilterQuery) -> Self {
        // The range applies only when both bounds are given.
        let expiration_range = match (query.expiration_date_start, query.expiration_date_end) {
            (Some(start), Some(end)) => Some(ExpirationDateRange::new(
                Timestamp::from_datetime(start),
                Timestamp::from_datetime(end),
            )),
            _ => None,
        };

        Self {
            id: query.id,
            name: query.name,
            description: query.description,
            discount_value: query.discount_value,
            discount_percentage: query.discount_percentage,
            status: query.status,
            code: query.code,
            responsible_user: query.responsible_user,
            expiration_date: query.expiration_date,
            expiration_range,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Coupon as returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub discount_value: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub status: CouponStatus,
    pub code: String,
    pub expiration_date: String,
    pub responsible_user: Option<String>,
    pub use_limit: Option<u32>,
    pub applicable_categories: Vec<String>,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id.map(|id| id.to_string()),
            name: coupon.name,
            description: coupon.description,
            discount_value: coupon.discount_value,
            discount_percentage: coupon.discount_percentage,
            status: coupon.status,
            code: coupon.code,
            expiration_date: coupon.expiration_date.as_datetime().to_rfc3339(),
            responsible_user: coupon.responsible_user,
            use_limit: coupon.use_limit,
            applicable_categories: coupon.applicable_categories.into_iter().collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&CouponError> for ErrorResponse {
    fn from(error: &CouponError) -> Self {
        let details = match error {
            CouponError::FieldCannotBeEmpty { fields } => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        };

        Self {
            code: error.code().to_string(),
            message: error.message(),
            details,
        }
    }
}
