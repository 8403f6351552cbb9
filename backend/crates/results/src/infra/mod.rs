//! Infrastructure Layer
//!
//! Result Store implementations, document storage and rendering engines.

pub mod fs_store;
pub mod memory;
pub mod postgres;
pub mod renderer;

pub use fs_store::FsDocumentStore;
pub use memory::InMemoryResultRepository;
pub use postgres::PgResultRepository;
pub use renderer::{CommandRenderer, HttpRenderer};
