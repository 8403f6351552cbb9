//! Infrastructure Layer
//!
//! Database implementations and the process-local fallback.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAdminRepository;
pub use postgres::PgAdminRepository;
