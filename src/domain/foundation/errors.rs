//! Error types shared across the domain and its ports.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    CouponNotFound,

    // Storage contract errors
    CouponIdRequired,
    CouponCodeAlreadyExists,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::CouponNotFound => "COUPON_NOT_FOUND",
            ErrorCode::CouponIdRequired => "COUPON_ID_REQUIRED",
            ErrorCode::CouponCodeAlreadyExists => "COUPON_CODE_ALREADY_EXISTS",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the error type returned by ports; use-case specific errors
/// convert from it.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error wrapping the given cause.
    pub fn database(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, cause))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the detail stored under `key`, if any.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_code() {
        let err = DomainError::new(ErrorCode::CouponNotFound, "Coupon not found");
        assert_eq!(format!("{}", err), "[COUPON_NOT_FOUND] Coupon not found");
    }

    #[test]
    fn details_are_looked_up_by_key() {
        let err = DomainError::new(ErrorCode::CouponCodeAlreadyExists, "duplicate")
            .with_detail("code", "SUMMER10");

        assert_eq!(err.detail("code"), Some("SUMMER10"));
        assert_eq!(err.detail("missing"), None);
    }

    #[test]
    fn database_error_includes_context() {
        let err = DomainError::database("Failed to save coupon", "connection reset");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Failed to save coupon: connection reset");
    }

    #[test]
    fn codes_render_screaming_snake_case() {
        assert_eq!(format!("{}", ErrorCode::CouponIdRequired), "COUPON_ID_REQUIRED");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
