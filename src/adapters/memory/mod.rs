//! In-memory adapters for development and tests.

mod coupon_repository;

pub use coupon_repository::InMemoryCouponRepository;
