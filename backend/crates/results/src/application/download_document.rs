//! Download Document Use Case
//!
//! Serves the stored PDF. A record whose document is missing (the write
//! after persist failed) is rendered again and the document written back.

use std::sync::Arc;

use kernel::id::ResultId;

use crate::application::config::ResultsConfig;
use crate::application::document::render_document;
use crate::domain::repository::{DocumentRenderer, DocumentStore, ResultRepository};
use crate::domain::services::document_file_name;
use crate::domain::value_objects::DocumentHash;
use crate::error::{ResultError, ResultsResult};

/// Output DTO for download
#[derive(Debug, Clone)]
pub struct DownloadOutput {
    pub file_name: String,
    pub document: Vec<u8>,
}

pub struct DownloadDocumentUseCase<R, D, S>
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

impl<R, D, S> DownloadDocumentUseCase<R, D, S>
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

    pub async fn execute(&self, result_id: &ResultId) -> ResultsResult<DownloadOutput> {
        let record = self
            .repo
            .find_by_id(result_id)
            .await?
            .ok_or(ResultError::NotFound)?;

        let document = match self.store.read(result_id).await? {
            Some(document) => document,
            None => {
                tracing::warn!(result_id = %result_id, "Document missing, rendering again");
                let document =
                    render_document(self.renderer.as_ref(), &record.sheet, &self.config).await?;

                if DocumentHash::of(&document) != record.document_hash {
                    tracing::warn!(
                        result_id = %result_id,
                        "Re-rendered document differs from the recorded hash"
                    );
                }

                // Not fatal: the next download renders again
                if let Err(e) = self.store.write(result_id, &document).await {
                    tracing::error!(result_id = %result_id, error = %e, "Document repair write failed");
                }
                document
            }
        };

        Ok(DownloadOutput {
            file_name: document_file_name(result_id),
            document,
        })
    }
}
