//! Submit Result Use Case
//!
//! validate -> duplicate check -> render -> hash -> persist -> store document

use std::sync::Arc;

use kernel::id::{AdminId, ResultId};

use crate::application::config::ResultsConfig;
use crate::application::document::render_document;
use crate::domain::entities::{ResultRecord, ResultSheet, SubmissionInput};
use crate::domain::repository::{DocumentRenderer, DocumentStore, ResultRepository};
use crate::domain::value_objects::DocumentHash;
use crate::error::{ResultError, ResultsResult};

/// Output DTO for submit result
#[derive(Debug, Clone)]
pub struct SubmitResultOutput {
    pub result_id: ResultId,
    pub document_hash: DocumentHash,
}

/// Submit Result Use Case
pub struct SubmitResultUseCase<R, D, S>
where
    R: ResultRepository,
    D: DocumentRenderer,
    S: DocumentStore,
{
    repo: Arc<R>,
    renderer: Arc<D>,
    store: Arc<S>,
    config: Arc<ResultsConfig>,
}

impl<R, D, S> SubmitResultUseCase<R, D, S>
where
    R: ResultRepository,
    D: DocumentRenderer,
    S: DocumentStore,
{
    pub fn new(repo: Arc<R>, renderer: Arc<D>, store: Arc<S>, config: Arc<ResultsConfig>) -> Self {
        Self {
            repo,
            renderer,
            store,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SubmissionInput,
        submitted_by: AdminId,
    ) -> ResultsResult<SubmitResultOutput> {
        let sheet =
            ResultSheet::parse(input, self.config.max_subjects).map_err(ResultError::Validation)?;

        // Fast path only: the Result Store rejects duplicates on insert as well
        if self
            .repo
            .exists_by_roll_semester(&sheet.roll_no, sheet.semester)
            .await?
        {
            return Err(ResultError::DuplicateResult);
        }

        let document = render_document(self.renderer.as_ref(), &sheet, &self.config).await?;
        let document_hash = DocumentHash::of(&document);

        let record = ResultRecord::new(sheet, document_hash);
        self.repo.insert(&record).await?;

        // The record is committed; a failed write leaves it without a document
        // until a download or the startup repair renders it again.
        if let Err(e) = self.store.write(&record.result_id, &document).await {
            tracing::error!(
                result_id = %record.result_id,
                error = %e,
                "Result persisted but document write failed"
            );
            return Err(e);
        }

        tracing::info!(
            result_id = %record.result_id,
            roll_no = %record.sheet.roll_no,
            semester = record.sheet.semester.get(),
            admin_id = %submitted_by,
            document_hash = %record.document_hash,
            "Result submitted"
        );

        Ok(SubmitResultOutput {
            result_id: record.result_id,
            document_hash: record.document_hash,
        })
    }
}
