//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod document;
pub mod download_document;
pub mod find_student;
pub mod repair_documents;
pub mod submit_result;
pub mod view_result;

// Re-exports
pub use config::ResultsConfig;
pub use download_document::{DownloadDocumentUseCase, DownloadOutput};
pub use find_student::{FindStudentInput, FindStudentUseCase};
pub use repair_documents::{RepairDocumentsUseCase, RepairReport};
pub use submit_result::{SubmitResultOutput, SubmitResultUseCase};
pub use view_result::ViewResultUseCase;
