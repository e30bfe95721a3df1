//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `coupon` - Coupon entity, lifecycle rules and validation

pub mod coupon;
pub mod foundation;
