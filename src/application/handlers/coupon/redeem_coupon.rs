//! RedeemCouponHandler - Command handler for consuming one coupon use.

use std::sync::Arc;

use crate::domain::coupon::{Coupon, CouponError};
use crate::domain::foundation::CouponId;
use crate::ports::CouponRepository;

use super::validate_coupon::load_redeemable;

/// Command to redeem a coupon once.
#[derive(Debug, Clone)]
pub struct RedeemCouponCommand {
    pub coupon_id: CouponId,
}

/// Handler for redeeming coupons.
///
/// Concurrent redemptions of the same coupon are serialized by the store's
/// single-row update; this handler does not retry.
pub struct RedeemCouponHandler {
    repository: Arc<dyn CouponRepository>,
}

impl RedeemCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RedeemCouponCommand) -> Result<Coupon, CouponError> {
        tracing::info!(coupon_id = %cmd.coupon_id, "Redeeming coupon");

        // 1. Same checks as the read-only validation
        let mut coupon = load_redeemable(self.repository.as_ref(), cmd.coupon_id).await?;

        // 2. Untracked coupons are unlimited and need no write
        if !coupon.consume_use() {
            tracing::info!(coupon_id = %cmd.coupon_id, "Coupon has no use limit, nothing to persist");
            return Ok(coupon);
        }

        // 3. Persist only the counter
        let updated = self.repository.update_usage(&coupon).await?;

        tracing::info!(
            coupon_id = %cmd.coupon_id,
            remaining = ?updated.use_limit,
            "Coupon redeemed"
        );
        Ok(updated)
    }
}
