//! HTTP adapter for coupon endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CouponFilterQuery, CouponResponse, CreateCouponRequest, ErrorResponse, UpdateCouponRequest,
};
pub use handlers::CouponHandlers;
pub use routes::coupon_routes;
