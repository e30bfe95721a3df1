//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repository for development and tests
//! - `postgres` - PostgreSQL repository
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryCouponRepository;
pub use postgres::PostgresCouponRepository;
