//! HTTP routes for coupon endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    add_applicable_category, create_coupon, deactivate_coupon, list_coupons, redeem_coupon,
    remove_applicable_category, update_coupon, validate_coupon, CouponHandlers,
};

/// Creates the coupon router.
///
/// # Routes
///
/// - `GET /coupon` - List coupons (query-string filter)
/// - `POST /coupon` - Create a coupon
/// - `PUT /coupon` - Update a coupon (id in body)
/// - `GET /coupon/:id/validate` - Redemption check, no write
/// - `PUT /coupon/:id/redeem` - Consume one use
/// - `PUT /coupon/:id/deactivate` - Deactivate
/// - `PUT /coupon/:id/applicable-category/:category_id` - Add category
/// - `DELETE /coupon/:id/applicable-category/:category_id` - Remove category
pub fn coupon_routes(handlers: CouponHandlers) -> Router {
    Router::new()
        .route(
            "/coupon",
            get(list_coupons).post(create_coupon).put(update_coupon),
        )
        .route("/coupon/:id/validate", get(validate_coupon))
        .route("/coupon/:id/redeem", put(redeem_coupon))
        .route("/coupon/:id/deactivate", put(deactivate_coupon))
        .route(
            "/coupon/:id/applicable-category/:category_id",
            put(add_applicable_category).delete(remove_applicable_category),
        )
        .with_state(handlers)
}
