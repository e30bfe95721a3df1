//! Coupon Manager - Promotional Coupon Lifecycle Service
//!
//! This crate manages discount coupons: creation, partial updates, filtered
//! search, validation for redemption, redemption with use-limit tracking,
//! deactivation and applicable-category maintenance.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
