//! Coupon command and query handlers.

mod create_coupon;
mod deactivate_coupon;
mod list_coupons;
mod manage_categories;
mod redeem_coupon;
mod update_coupon;
mod validate_coupon;

pub use create_coupon::{CreateCouponCommand, CreateCouponHandler};
pub use deactivate_coupon::{DeactivateCouponCommand, DeactivateCouponHandler};
pub use list_coupons::{ListCouponsHandler, ListCouponsQuery};
pub use manage_categories::{
    AddApplicableCategoryCommand, AddApplicableCategoryHandler, RemoveApplicableCategoryCommand,
    RemoveApplicableCategoryHandler,
};
pub use redeem_coupon::{RedeemCouponCommand, RedeemCouponHandler};
pub use update_coupon::{UpdateCouponCommand, UpdateCouponHandler};
pub use validate_coupon::{ValidateCouponHandler, ValidateCouponQuery};
