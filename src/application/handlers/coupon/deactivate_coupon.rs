//! DeactivateCouponHandler - Command handler for switching coupons off.

use std::sync::Arc;

use crate::domain::coupon::validator::ensure_not_already_inactive;
use crate::domain::coupon::{Coupon, CouponError};
use crate::domain::foundation::CouponId;
use crate::ports::CouponRepository;

/// Command to deactivate a coupon.
#[derive(Debug, Clone)]
pub struct DeactivateCouponCommand {
    pub coupon_id: CouponId,
}

/// Handler for deactivating coupons.
pub struct DeactivateCouponHandler {
    repository: Arc<dyn CouponRepository>,
}

impl DeactivateCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeactivateCouponCommand) -> Result<Coupon, CouponError> {
        tracing::info!(coupon_id = %cmd.coupon_id, "Deactivating coupon");

        // 1. Load
        let coupon = self
            .repository
            .find_by_id(&cmd.coupon_id)
            .await?
            .ok_or_else(|| CouponError::not_found(cmd.coupon_id))?;

        // 2. Reject repeated deactivation
        let mut coupon = ensure_not_already_inactive(coupon)?;

        // 3. Deactivate and persist the full entity
        coupon.deactivate();
        let saved = self.repository.save(&coupon).await?;

        tracing::info!(coupon_id = %cmd.coupon_id, "Coupon deactivated");
        Ok(saved)
    }
}
