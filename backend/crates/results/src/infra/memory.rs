//! In-Memory Result Store
//!
//! Used when no database is configured and by tests. Records are kept in
//! creation order; the (roll number, semester) check and the insert happen
//! under one write lock.

use kernel::id::ResultId;
use parking_lot::RwLock;

use crate::domain::entities::ResultRecord;
use crate::domain::repository::ResultRepository;
use crate::domain::value_objects::{RollNo, Semester};
use crate::error::{ResultError, ResultsResult};

#[derive(Debug, Default)]
pub struct InMemoryResultRepository {
    records: RwLock<Vec<ResultRecord>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ResultRepository for InMemoryResultRepository {
    async fn insert(&self, record: &ResultRecord) -> ResultsResult<()> {
        let mut records = self.records.write();
        let duplicate = records.iter().any(|r| {
            r.sheet.roll_no == record.sheet.roll_no && r.sheet.semester == record.sheet.semester
        });
        if duplicate {
            return Err(ResultError::DuplicateResult);
        }
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, result_id: &ResultId) -> ResultsResult<Option<ResultRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.result_id == *result_id)
            .cloned())
    }

    async fn exists_by_roll_semester(
        &self,
        roll_no: &RollNo,
        semester: Semester,
    ) -> ResultsResult<bool> {
        Ok(self
            .records
            .read()
            .iter()
            .any(|r| r.sheet.roll_no == *roll_no && r.sheet.semester == semester))
    }

    async fn find_by_name_and_roll(
        &self,
        name_fragment: &str,
        roll_no: &RollNo,
    ) -> ResultsResult<Option<ResultRecord>> {
        let needle = name_fragment.to_lowercase();
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| {
                r.sheet.roll_no == *roll_no && r.sheet.student_name.to_lowercase().contains(&needle)
            })
            .cloned())
    }

    async fn list_all(&self) -> ResultsResult<Vec<ResultRecord>> {
        Ok(self.records.read().clone())
    }
}
