//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresCouponRepository` - Coupon storage with single-statement conditional updates

mod coupon_repository;

pub use coupon_repository::PostgresCouponRepository;
