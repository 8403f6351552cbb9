//! Find Student Use Case
//!
//! Public lookup of a record id by student name and roll number.

use std::sync::Arc;

use kernel::id::ResultId;

use crate::domain::repository::ResultRepository;
use crate::domain::value_objects::RollNo;
use crate::error::{ResultError, ResultsResult};

/// Find student input
pub struct FindStudentInput {
    pub student_name: String,
    pub roll_no: String,
}

/// Find Student Use Case
///
/// Matches the roll number exactly (after uppercasing) and the name as a
/// case-insensitive substring. Several matches are not an error: the
/// earliest record wins.
pub struct FindStudentUseCase<R>
where
    R: ResultRepository,
{
    repo: Arc<R>,
}

impl<R> FindStudentUseCase<R>
where
    R: ResultRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: FindStudentInput) -> ResultsResult<ResultId> {
        let student_name = input.student_name.trim();
        let roll_no = RollNo::normalize(&input.roll_no);
        if student_name.is_empty() || roll_no.is_empty() {
            return Err(ResultError::MissingFields);
        }

        let record = self
            .repo
            .find_by_name_and_roll(student_name, &RollNo::from_normalized(roll_no))
            .await?
            .ok_or(ResultError::NotFound)?;

        tracing::debug!(result_id = %record.result_id, "Student lookup matched");

        Ok(record.result_id)
    }
}
