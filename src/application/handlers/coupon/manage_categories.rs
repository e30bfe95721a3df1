//! Handlers for adding and removing applicable categories.

use std::sync::Arc;

use crate::domain::coupon::validator::{ensure_category_not_present, ensure_category_present};
use crate::domain::coupon::{Coupon, CouponError};
use crate::domain::foundation::CouponId;
use crate::ports::CouponRepository;

/// Command to make a coupon applicable to one more category.
#[derive(Debug, Clone)]
pub struct AddApplicableCategoryCommand {
    pub coupon_id: CouponId,
    pub category_id: String,
}

/// Command to stop a coupon applying to a category.
#[derive(Debug, Clone)]
pub struct RemoveApplicableCategoryCommand {
    pub coupon_id: CouponId,
    pub category_id: String,
}

async fn load(repository: &dyn CouponRepository, id: CouponId) -> Result<Coupon, CouponError> {
    repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| CouponError::not_found(id))
}

/// Handler for adding an applicable category.
pub struct AddApplicableCategoryHandler {
    repository: Arc<dyn CouponRepository>,
}

impl AddApplicableCategoryHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddApplicableCategoryCommand) -> Result<Coupon, CouponError> {
        tracing::info!(
            coupon_id = %cmd.coupon_id,
            category_id = %cmd.category_id,
            "Adding applicable category"
        );

        let coupon = load(self.repository.as_ref(), cmd.coupon_id).await?;
        let mut coupon = ensure_category_not_present(coupon, &cmd.category_id)?;

        coupon.add_applicable_category(cmd.category_id);
        let updated = self.repository.update_applicable_categories(&coupon).await?;

        Ok(updated)
    }
}

/// Handler for removing an applicable category.
pub struct RemoveApplicableCategoryHandler {
    repository: Arc<dyn CouponRepository>,
}

impl RemoveApplicableCategoryHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RemoveApplicableCategoryCommand,
    ) -> Result<Coupon, CouponError> {
        tracing::info!(
            coupon_id = %cmd.coupon_id,
            category_id = %cmd.category_id,
            "Removing applicable category"
        );

        let coupon = load(self.repository.as_ref(), cmd.coupon_id).await?;
        let mut coupon = ensure_category_present(coupon, &cmd.category_id)?;

        coupon.remove_applicable_category(&cmd.category_id);
        let updated = self.repository.update_applicable_categories(&coupon).await?;

        Ok(updated)
    }
}
