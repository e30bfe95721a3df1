//! ValidateCouponHandler - Read-only redemption check.

use std::sync::Arc;

use crate::domain::coupon::validator::{ensure_active, ensure_has_available_uses, ensure_not_expired};
use crate::domain::coupon::{Coupon, CouponError};
use crate::domain::foundation::{CouponId, Timestamp};
use crate::ports::CouponRepository;

/// Query asking whether a coupon could be redeemed right now.
#[derive(Debug, Clone)]
pub struct ValidateCouponQuery {
    pub coupon_id: CouponId,
}

/// Handler for the redemption check. Never writes.
pub struct ValidateCouponHandler {
    repository: Arc<dyn CouponRepository>,
}

impl ValidateCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ValidateCouponQuery) -> Result<Coupon, CouponError> {
        tracing::debug!(coupon_id = %query.coupon_id, "Validating coupon");

        let coupon = load_redeemable(self.repository.as_ref(), query.coupon_id).await?;

        tracing::debug!(coupon_id = %query.coupon_id, "Coupon is redeemable");
        Ok(coupon)
    }
}

/// Loads a coupon and runs the redemption chain: not expired, active, uses
/// remaining.
pub(super) async fn load_redeemable(
    repository: &dyn CouponRepository,
    id: CouponId,
) -> Result<Coupon, CouponError> {
    let coupon = repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| CouponError::not_found(id))?;

    ensure_not_expired(coupon, Timestamp::now())
        .and_then(ensure_active)
        .and_then(ensure_has_available_uses)
}
