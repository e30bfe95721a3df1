//! Coupon-specific error types.
//!
//! Every business error carries a stable code (`CPM_ERR_n`) that clients
//! can match on, plus the parameters needed to render its message.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Infrastructure | 500 |
//! | everything else | 400 |

use std::fmt;

use crate::domain::foundation::{CouponId, DomainError, ErrorCode};

/// Stable, client-facing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouponErrorCode {
    DiscountFieldMustBeInformed,
    ExpirationDateLessThanCurrentDate,
    DiscountValueLessThanZero,
    DiscountPercentageLessThanZero,
    FieldCannotBeEmpty,
    CouponExpired,
    CouponNotFound,
    InvalidCoupon,
    CouponIdRequired,
    CouponAlreadyInactive,
    CouponUsageLimitReached,
    CouponCodeAlreadyExists,
    ApplicableCategoryAlreadyAdded,
    CouponStatusRequired,
    CouponExpirationDateRequired,
    CategoryNotInCoupon,
    InternalError,
}

impl CouponErrorCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponErrorCode::DiscountFieldMustBeInformed => "CPM_ERR_1",
            CouponErrorCode::ExpirationDateLessThanCurrentDate => "CPM_ERR_2",
            CouponErrorCode::DiscountValueLessThanZero => "CPM_ERR_3",
            CouponErrorCode::DiscountPercentageLessThanZero => "CPM_ERR_4",
            CouponErrorCode::FieldCannotBeEmpty => "CPM_ERR_5",
            CouponErrorCode::CouponExpired => "CPM_ERR_6",
            CouponErrorCode::CouponNotFound => "CPM_ERR_7",
            CouponErrorCode::InvalidCoupon => "CPM_ERR_8",
            CouponErrorCode::CouponIdRequired => "CPM_ERR_9",
            CouponErrorCode::CouponAlreadyInactive => "CPM_ERR_10",
            CouponErrorCode::CouponUsageLimitReached => "CPM_ERR_11",
            CouponErrorCode::CouponCodeAlreadyExists => "CPM_ERR_12",
            CouponErrorCode::ApplicableCategoryAlreadyAdded => "CPM_ERR_13",
            CouponErrorCode::CouponStatusRequired => "CPM_ERR_14",
            CouponErrorCode::CouponExpirationDateRequired => "CPM_ERR_15",
            CouponErrorCode::CategoryNotInCoupon => "CPM_ERR_16",
            CouponErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for CouponErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coupon-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponError {
    /// Neither discount value nor discount percentage was given.
    DiscountFieldMustBeInformed,

    /// Expiration date is not strictly in the future.
    ExpirationDateLessThanCurrentDate(Option<CouponId>),

    /// Discount value is negative.
    DiscountValueLessThanZero,

    /// Discount percentage is negative.
    DiscountPercentageLessThanZero,

    /// One or more required fields are missing or blank.
    FieldCannotBeEmpty { fields: Vec<String> },

    /// Coupon is expired.
    Expired(Option<CouponId>),

    /// Coupon id was absent or no coupon exists with it.
    NotFound(Option<CouponId>),

    /// Coupon is inactive and cannot be redeemed.
    Invalid(Option<CouponId>),

    /// Storage update attempted without an id.
    IdRequired,

    /// Coupon is already inactive.
    AlreadyInactive(Option<CouponId>),

    /// Coupon has no remaining uses.
    UsageLimitReached(Option<CouponId>),

    /// Another coupon already uses this code.
    CodeAlreadyExists(String),

    /// Category is already applicable to the coupon.
    ApplicableCategoryAlreadyAdded(String),

    /// Update payload did not carry a status.
    StatusRequired,

    /// Update to ACTIVE did not carry an expiration date.
    ExpirationDateRequired,

    /// Category is not applicable to the coupon.
    CategoryNotInCoupon(String),

    /// Infrastructure error.
    Infrastructure(String),
}

fn render_id(id: &Option<CouponId>) -> String {
    id.map_or_else(|| "null".to_string(), |id| id.to_string())
}

impl CouponError {
    pub fn field_cannot_be_empty<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CouponError::FieldCannotBeEmpty {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_found(id: CouponId) -> Self {
        CouponError::NotFound(Some(id))
    }

    pub fn code_already_exists(code: impl Into<String>) -> Self {
        CouponError::CodeAlreadyExists(code.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CouponError::Infrastructure(message.into())
    }

    /// Returns the stable error code.
    pub fn code(&self) -> CouponErrorCode {
        match self {
            CouponError::DiscountFieldMustBeInformed => CouponErrorCode::DiscountFieldMustBeInformed,
            CouponError::ExpirationDateLessThanCurrentDate(_) => {
                CouponErrorCode::ExpirationDateLessThanCurrentDate
            }
            CouponError::DiscountValueLessThanZero => CouponErrorCode::DiscountValueLessThanZero,
            CouponError::DiscountPercentageLessThanZero => {
                CouponErrorCode::DiscountPercentageLessThanZero
            }
            CouponError::FieldCannotBeEmpty { .. } => CouponErrorCode::FieldCannotBeEmpty,
            CouponError::Expired(_) => CouponErrorCode::CouponExpired,
            CouponError::NotFound(_) => CouponErrorCode::CouponNotFound,
            CouponError::Invalid(_) => CouponErrorCode::InvalidCoupon,
            CouponError::IdRequired => CouponErrorCode::CouponIdRequired,
            CouponError::AlreadyInactive(_) => CouponErrorCode::CouponAlreadyInactive,
            CouponError::UsageLimitReached(_) => CouponErrorCode::CouponUsageLimitReached,
            CouponError::CodeAlreadyExists(_) => CouponErrorCode::CouponCodeAlreadyExists,
            CouponError::ApplicableCategoryAlreadyAdded(_) => {
                CouponErrorCode::ApplicableCategoryAlreadyAdded
            }
            CouponError::StatusRequired => CouponErrorCode::CouponStatusRequired,
            CouponError::ExpirationDateRequired => CouponErrorCode::CouponExpirationDateRequired,
            CouponError::CategoryNotInCoupon(_) => CouponErrorCode::CategoryNotInCoupon,
            CouponError::Infrastructure(_) => CouponErrorCode::InternalError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            CouponError::DiscountFieldMustBeInformed => {
                "Either the discount value or the discount percentage must be informed".to_string()
            }
            CouponError::ExpirationDateLessThanCurrentDate(id) => format!(
                "Expiration date of coupon {} must be later than the current date",
                render_id(id)
            ),
            CouponError::DiscountValueLessThanZero => {
                "Discount value cannot be less than zero".to_string()
            }
            CouponError::DiscountPercentageLessThanZero => {
                "Discount percentage cannot be less than zero".to_string()
            }
            CouponError::FieldCannotBeEmpty { fields } => {
                format!("The following fields cannot be empty: {}", fields.join(", "))
            }
            CouponError::Expired(id) => format!("Coupon {} is expired", render_id(id)),
            CouponError::NotFound(id) => format!("Coupon not found: {}", render_id(id)),
            CouponError::Invalid(id) => format!("Coupon {} is not valid", render_id(id)),
            CouponError::IdRequired => "Coupon id is required".to_string(),
            CouponError::AlreadyInactive(id) => {
                format!("Coupon {} is already inactive", render_id(id))
            }
            CouponError::UsageLimitReached(id) => {
                format!("Coupon {} has reached its usage limit", render_id(id))
            }
            CouponError::CodeAlreadyExists(code) => {
                format!("A coupon with code '{}' already exists", code)
            }
            CouponError::ApplicableCategoryAlreadyAdded(category) => {
                format!("Category '{}' is already applicable to this coupon", category)
            }
            CouponError::StatusRequired => "Coupon status is required".to_string(),
            CouponError::ExpirationDateRequired => {
                "Expiration date is required to activate a coupon".to_string()
            }
            CouponError::CategoryNotInCoupon(category) => {
                format!("Category '{}' is not applicable to this coupon", category)
            }
            CouponError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true for lookup failures (rendered as 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CouponError::NotFound(_))
    }

    /// Returns true for unclassified failures (rendered as 500).
    pub fn is_internal(&self) -> bool {
        matches!(self, CouponError::Infrastructure(_))
    }
}

impl fmt::Display for CouponError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for CouponError {}

impl From<DomainError> for CouponError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CouponIdRequired => CouponError::IdRequired,
            ErrorCode::CouponNotFound => CouponError::NotFound(
                err.detail("id").and_then(|id| id.parse::<CouponId>().ok()),
            ),
            ErrorCode::CouponCodeAlreadyExists => {
                CouponError::CodeAlreadyExists(err.detail("code").unwrap_or("unknown").to_string())
            }
            _ => CouponError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CouponError> for DomainError {
    fn from(err: CouponError) -> Self {
        let code = match &err {
            CouponError::IdRequired => ErrorCode::CouponIdRequired,
            CouponError::NotFound(_) => ErrorCode::CouponNotFound,
            CouponError::CodeAlreadyExists(_) => ErrorCode::CouponCodeAlreadyExists,
            CouponError::Infrastructure(_) => ErrorCode::InternalError,
            _ => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.message())
    }
}
