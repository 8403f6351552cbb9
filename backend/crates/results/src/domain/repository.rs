//! Repository Traits
//!
//! Interfaces for the Result Store, document storage and the rendering
//! engine. Implementations are in the infrastructure layer.

use kernel::id::ResultId;

use crate::domain::entities::ResultRecord;
use crate::domain::value_objects::{RollNo, Semester};
use crate::error::ResultsResult;

/// Result Store
#[trait_variant::make(ResultRepository: Send)]
pub trait LocalResultRepository {
    /// Insert a new record
    ///
    /// Fails with `ResultError::DuplicateResult` when a record with the same
    /// (roll number, semester) exists; the check is atomic with the insert.
    async fn insert(&self, record: &ResultRecord) -> ResultsResult<()>;

    /// Find a record by id
    async fn find_by_id(&self, result_id: &ResultId) -> ResultsResult<Option<ResultRecord>>;

    /// Whether a record exists for (roll number, semester)
    async fn exists_by_roll_semester(
        &self,
        roll_no: &RollNo,
        semester: Semester,
    ) -> ResultsResult<bool>;

    /// First record (by creation order) with this roll number whose student
    /// name contains `name_fragment`, case-insensitively
    async fn find_by_name_and_roll(
        &self,
        name_fragment: &str,
        roll_no: &RollNo,
    ) -> ResultsResult<Option<ResultRecord>>;

    /// All records in creation order
    async fn list_all(&self) -> ResultsResult<Vec<ResultRecord>>;
}

/// Durable storage for rendered documents, keyed by record id
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Store (or replace) the document for `result_id`
    async fn write(&self, result_id: &ResultId, document: &[u8]) -> ResultsResult<()>;

    /// Read the document, `None` when it was never written
    async fn read(&self, result_id: &ResultId) -> ResultsResult<Option<Vec<u8>>>;

    async fn exists(&self, result_id: &ResultId) -> ResultsResult<bool>;
}

/// Rendering engine: HTML page in, PDF bytes out
///
/// Callers bound every call with a timeout and drop the future on expiry,
/// so implementations must release their resources on drop.
#[trait_variant::make(DocumentRenderer: Send)]
pub trait LocalDocumentRenderer {
    async fn render(&self, html: &str) -> ResultsResult<Vec<u8>>;
}
