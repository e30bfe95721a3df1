//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `CouponRepository` - Coupon lookup, search and conditional updates

mod coupon_repository;

pub use coupon_repository::CouponRepository;
