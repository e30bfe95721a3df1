//! HTTP handlers for coupon endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::coupon::{
    AddApplicableCategoryCommand, AddApplicableCategoryHandler, CreateCouponCommand,
    CreateCouponHandler, DeactivateCouponCommand, DeactivateCouponHandler, ListCouponsHandler,
    ListCouponsQuery, RedeemCouponCommand, RedeemCouponHandler, RemoveApplicableCategoryCommand,
    RemoveApplicableCategoryHandler, UpdateCouponCommand, UpdateCouponHandler,
    ValidateCouponHandler, ValidateCouponQuery,
};
use crate::domain::coupon::{Coupon, CouponError};
use crate::domain::foundation::CouponId;
use crate::ports::CouponRepository;

use super::dto::{
    CouponFilterQuery, CouponResponse, CreateCouponRequest, ErrorResponse, UpdateCouponRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CouponHandlers {
    list_handler: Arc<ListCouponsHandler>,
    create_handler: Arc<CreateCouponHandler>,
    update_handler: Arc<UpdateCouponHandler>,
    validate_handler: Arc<ValidateCouponHandler>,
    redeem_handler: Arc<RedeemCouponHandler>,
    deactivate_handler: Arc<DeactivateCouponHandler>,
    add_category_handler: Arc<AddApplicableCategoryHandler>,
    remove_category_handler: Arc<RemoveApplicableCategoryHandler>,
}

impl CouponHandlers {
    /// Wires every coupon use case to the same repository.
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self {
            list_handler: Arc::new(ListCouponsHandler::new(repository.clone())),
            create_handler: Arc::new(CreateCouponHandler::new(repository.clone())),
            update_handler: Arc::new(UpdateCouponHandler::new(repository.clone())),
            validate_handler: Arc::new(ValidateCouponHandler::new(repository.clone())),
            redeem_handler: Arc::new(RedeemCouponHandler::new(repository.clone())),
            deactivate_handler: Arc::new(DeactivateCouponHandler::new(repository.clone())),
            add_category_handler: Arc::new(AddApplicableCategoryHandler::new(repository.clone())),
            remove_category_handler: Arc::new(RemoveApplicableCategoryHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /coupon - List coupons matching the query-string filter
pub async fn list_coupons(
    State(handlers): State<CouponHandlers>,
    query: Result<Query<CouponFilterQuery>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let query = ListCouponsQuery {
        filter: params.into(),
    };

    match handlers.list_handler.handle(query).await {
        Ok(coupons) => {
            let response: Vec<CouponResponse> = coupons.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_coupon_error(e),
    }
}

/// POST /coupon - Create a coupon
pub async fn create_coupon(
    State(handlers): State<CouponHandlers>,
    payload: Result<Json<CreateCouponRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let cmd = CreateCouponCommand { draft: req.into() };

    match handlers.create_handler.handle(cmd).await {
        Ok(coupon) => coupon_response(StatusCode::CREATED, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

/// PUT /coupon - Update a coupon; the id travels in the body
pub async fn update_coupon(
    State(handlers): State<CouponHandlers>,
    payload: Result<Json<UpdateCouponRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let cmd = UpdateCouponCommand { patch: req.into() };

    match handlers.update_handler.handle(cmd).await {
        Ok(coupon) => coupon_response(StatusCode::OK, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

/// GET /coupon/:id/validate - Check whether a coupon is redeemable
pub async fn validate_coupon(
    State(handlers): State<CouponHandlers>,
    Path(coupon_id): Path<String>,
) -> Response {
    let coupon_id = match parse_coupon_id(&coupon_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .validate_handler
        .handle(ValidateCouponQuery { coupon_id })
        .await
    {
        Ok(coupon) => coupon_response(StatusCode::OK, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

/// PUT /coupon/:id/redeem - Consume one use
pub async fn redeem_coupon(
    State(handlers): State<CouponHandlers>,
    Path(coupon_id): Path<String>,
) -> Response {
    let coupon_id = match parse_coupon_id(&coupon_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .redeem_handler
        .handle(RedeemCouponCommand { coupon_id })
        .await
    {
        Ok(coupon) => coupon_response(StatusCode::OK, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

/// PUT /coupon/:id/deactivate - Switch a coupon off
pub async fn deactivate_coupon(
    State(handlers): State<CouponHandlers>,
    Path(coupon_id): Path<String>,
) -> Response {
    let coupon_id = match parse_coupon_id(&coupon_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .deactivate_handler
        .handle(DeactivateCouponCommand { coupon_id })
        .await
    {
        Ok(coupon) => coupon_response(StatusCode::OK, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

/// PUT /coupon/:id/applicable-category/:category_id - Add a category
pub async fn add_applicable_category(
    State(handlers): State<CouponHandlers>,
    Path((coupon_id, category_id)): Path<(String, String)>,
) -> Response {
    let coupon_id = match parse_coupon_id(&coupon_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AddApplicableCategoryCommand {
        coupon_id,
        category_id,
    };

    match handlers.add_category_handler.handle(cmd).await {
        Ok(coupon) => coupon_response(StatusCode::OK, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

/// DELETE /coupon/:id/applicable-category/:category_id - Remove a category
pub async fn remove_applicable_category(
    State(handlers): State<CouponHandlers>,
    Path((coupon_id, category_id)): Path<(String, String)>,
) -> Response {
    let coupon_id = match parse_coupon_id(&coupon_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RemoveApplicableCategoryCommand {
        coupon_id,
        category_id,
    };

    match handlers.remove_category_handler.handle(cmd).await {
        Ok(coupon) => coupon_response(StatusCode::OK, coupon),
        Err(e) => handle_coupon_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_coupon_id(raw: &str) -> Result<CouponId, Response> {
    raw.parse::<CouponId>()
        .map_err(|_| bad_request("Invalid coupon ID"))
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn coupon_response(status: StatusCode, coupon: Coupon) -> Response {
    (status, Json(CouponResponse::from(coupon))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_coupon_error(error: CouponError) -> Response {
    let status = if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else if error.is_internal() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    };

    if error.is_internal() {
        tracing::error!(code = %error.code(), error = %error.message(), "Coupon request failed");
    } else {
        tracing::warn!(code = %error.code(), error = %error.message(), "Coupon request rejected");
    }

    (status, Json(ErrorResponse::from(&error))).into_response()
}
