//! Coupon status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a coupon.
///
/// `Expired` can also be derived from the expiration date, see
/// [`Coupon::is_expired`](super::Coupon::is_expired).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponStatus {
    /// Redeemable while not expired and uses remain.
    Active,
    /// Switched off by an operator.
    Inactive,
    /// Explicitly marked as expired.
    Expired,
}

impl CouponStatus {
    /// Returns the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponStatus::Active => "ACTIVE",
            CouponStatus::Inactive => "INACTIVE",
            CouponStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(CouponStatus::Active),
            "INACTIVE" => Ok(CouponStatus::Inactive),
            "EXPIRED" => Ok(CouponStatus::Expired),
            other => Err(format!("Invalid coupon status: {}", other)),
        }
    }
}
