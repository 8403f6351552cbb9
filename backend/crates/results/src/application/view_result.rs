//! View Result Use Case
//!
//! HTML result sheet for a stored record, including its document hash.

use std::sync::Arc;

use kernel::id::ResultId;

use crate::application::config::ResultsConfig;
use crate::domain::repository::ResultRepository;
use crate::domain::services::render_result_sheet;
use crate::error::{ResultError, ResultsResult};

pub struct ViewResultUseCase<R>
where
    R: ResultRepository,
{
    repo: Arc<R>,
    config: Arc<ResultsConfig>,
}

impl<R> ViewResultUseCase<R>
where
    R: ResultRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ResultsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, result_id: &ResultId) -> ResultsResult<String> {
        let record = self
            .repo
            .find_by_id(result_id)
            .await?
            .ok_or(ResultError::NotFound)?;

        Ok(render_result_sheet(
            &record.sheet,
            &self.config.institution_name,
            Some(&record.document_hash),
        ))
    }
}
