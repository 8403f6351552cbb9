//! Results Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Result sheet, marks, document hash, repository traits
//! - `application/` - Submission pipeline, lookup, view, download, repair
//! - `infra/` - PostgreSQL and in-memory Result Stores, filesystem document
//!   storage, rendering engines
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Submission Pipeline
//! validate -> duplicate check -> render PDF -> SHA-256 -> persist -> store
//! document. Nothing is persisted unless rendering succeeded; a document
//! write that fails after persisting is repaired on download or at startup.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use application::{RepairDocumentsUseCase, RepairReport, ResultsConfig};
pub use error::{ResultError, ResultsResult};
pub use infra::{
    CommandRenderer, FsDocumentStore, HttpRenderer, InMemoryResultRepository, PgResultRepository,
};
pub use presentation::router::{results_router, results_router_generic};
