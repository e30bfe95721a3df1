//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod coupon;

pub use coupon::{
    AddApplicableCategoryCommand, AddApplicableCategoryHandler, CreateCouponCommand,
    CreateCouponHandler, DeactivateCouponCommand, DeactivateCouponHandler, ListCouponsHandler,
    ListCouponsQuery, RedeemCouponCommand, RedeemCouponHandler, RemoveApplicableCategoryCommand,
    RemoveApplicableCategoryHandler, UpdateCouponCommand, UpdateCouponHandler,
    ValidateCouponHandler, ValidateCouponQuery,
};
