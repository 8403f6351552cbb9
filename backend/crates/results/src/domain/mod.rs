//! Domain Layer
//!
//! Contains entities, value objects, the result sheet layout and the
//! repository/capability traits.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{ResultRecord, ResultSheet, Subject, SubjectInput, SubmissionInput};
pub use repository::{DocumentRenderer, DocumentStore, ResultRepository};
pub use value_objects::{DocumentHash, Marks, RollNo, Semester};
