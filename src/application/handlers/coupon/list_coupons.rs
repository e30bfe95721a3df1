//! ListCouponsHandler - Query handler for searching coupons.

use std::sync::Arc;

use crate::domain::coupon::{Coupon, CouponError, CouponFilter};
use crate::ports::CouponRepository;

/// Query for coupons matching a filter. An empty filter lists every coupon.
#[derive(Debug, Clone, Default)]
pub struct ListCouponsQuery {
    pub filter: CouponFilter,
}

/// Handler for listing coupons.
pub struct ListCouponsHandler {
    repository: Arc<dyn CouponRepository>,
}

impl ListCouponsHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListCouponsQuery) -> Result<Vec<Coupon>, CouponError> {
        tracing::debug!(filter = ?query.filter, "Listing coupons");

        let coupons = self.repository.find_by_filter(&query.filter).await?;

        tracing::debug!(count = coupons.len(), "Coupons listed");
        Ok(coupons)
    }
}
