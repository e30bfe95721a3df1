//! CreateCouponHandler - Command handler for creating coupons.

use std::sync::Arc;

use crate::domain::coupon::validator::{validate_coupon_code, validate_create};
use crate::domain::coupon::{Coupon, CouponDraft, CouponError, CouponStatus};
use crate::domain::foundation::Timestamp;
use crate::ports::CouponRepository;

/// Command to create a coupon.
#[derive(Debug, Clone)]
pub struct CreateCouponCommand {
    pub draft: CouponDraft,
}

/// Handler for creating coupons.
///
/// The submitted status is ignored; new coupons always start `ACTIVE`.
pub struct CreateCouponHandler {
    repository: Arc<dyn CouponRepository>,
}

impl CreateCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateCouponCommand) -> Result<Coupon, CouponError> {
        tracing::info!(code = ?cmd.draft.code, "Creating coupon");

        // 1. Validate fields, expiration and discounts
        let draft = validate_create(cmd.draft, Timestamp::now())?;

        // 2. Code must be unused
        let mut draft = validate_coupon_code(self.repository.as_ref(), draft).await?;

        // 3. Force initial status
        draft.status = Some(CouponStatus::Active);
        let coupon = draft.into_coupon()?;

        // 4. Persist
        let saved = self.repository.save(&coupon).await?;

        tracing::info!(coupon_id = ?saved.id, code = %saved.code, "Coupon created");
        Ok(saved)
    }
}
