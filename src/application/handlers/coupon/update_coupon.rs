//! UpdateCouponHandler - Command handler for partial coupon updates.

use std::sync::Arc;

use crate::domain::coupon::validator::{validate_coupon_id, validate_update};
use crate::domain::coupon::{Coupon, CouponError, CouponPatch, CouponStatus, FieldPatch};
use crate::domain::foundation::{CouponId, Timestamp};
use crate::ports::CouponRepository;

/// Command to update a coupon. Only the fields present in the patch change.
#[derive(Debug, Clone)]
pub struct UpdateCouponCommand {
    pub patch: CouponPatch,
}

/// Handler for updating coupons.
pub struct UpdateCouponHandler {
    repository: Arc<dyn CouponRepository>,
}

impl UpdateCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateCouponCommand) -> Result<Coupon, CouponError> {
        let patch = cmd.patch;

        // 1. Id is required
        let id = validate_coupon_id(patch.id)?;
        tracing::info!(coupon_id = %id, "Updating coupon");

        // 2. Load current state
        let stored = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CouponError::not_found(id))?;

        // 3. Status rules
        check_status_change(&patch, id, Timestamp::now())?;

        // 4. Validate the coupon as it would look after the update
        validate_update(patch.merge_onto(&stored))?;

        // 5. Persist only the present fields
        let updated = self.repository.update(&patch).await?;

        tracing::info!(coupon_id = %id, status = %updated.status, "Coupon updated");
        Ok(updated)
    }
}

/// Status must be sent on every update. Activating additionally requires an
/// expiration date strictly in the future.
fn check_status_change(patch: &CouponPatch, id: CouponId, now: Timestamp) -> Result<(), CouponError> {
    match &patch.status {
        FieldPatch::Set(CouponStatus::Active) => match &patch.expiration_date {
            FieldPatch::Set(expiration) if !expiration.is_after(&now) => {
                Err(CouponError::ExpirationDateLessThanCurrentDate(Some(id)))
            }
            FieldPatch::Set(_) => Ok(()),
            FieldPatch::Absent | FieldPatch::Clear => Err(CouponError::ExpirationDateRequired),
        },
        FieldPatch::Set(_) => Ok(()),
        FieldPatch::Absent | FieldPatch::Clear => Err(CouponError::StatusRequired),
    }
}
