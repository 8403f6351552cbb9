//! Repair Documents Use Case
//!
//! Startup reconciliation: every record gets its document back if the
//! write after persist never happened.

use std::sync::Arc;

use crate::application::config::ResultsConfig;
use crate::application::document::render_document;
use crate::domain::repository::{DocumentRenderer, DocumentStore, ResultRepository};
use crate::domain::value_objects::DocumentHash;
use crate::error::ResultsResult;

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub scanned: usize,
    pub repaired: usize,
    pub failed: usize,
    /// Restored documents whose digest differs from the recorded hash
    pub hash_mismatches: usize,
}

pub struct RepairDocumentsUseCase<R, D, S>
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

impl<R, D, S> RepairDocumentsUseCase<R, D, S>
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

    /// Per-record failures are logged and counted; only a failure to list
    /// the records aborts the pass.
    pub async fn execute(&self) -> ResultsResult<RepairReport> {
        let records = self.repo.list_all().await?;
        let mut report = RepairReport {
            scanned: records.len(),
            ..RepairReport::default()
        };

        for record in &records {
            match self.store.exists(&record.result_id).await {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(result_id = %record.result_id, error = %e, "Document check failed");
                    report.failed += 1;
                    continue;
                }
            }

            let repaired = async {
                let document =
                    render_document(self.renderer.as_ref(), &record.sheet, &self.config).await?;
                self.store.write(&record.result_id, &document).await?;
                Ok::<_, crate::error::ResultError>(DocumentHash::of(&document))
            }
            .await;

            match repaired {
                Ok(hash) => {
                    if hash != record.document_hash {
                        tracing::warn!(
                            result_id = %record.result_id,
                            recorded = %record.document_hash,
                            rendered = %hash,
                            "Restored document differs from the recorded hash"
                        );
                        report.hash_mismatches += 1;
                    }
                    tracing::info!(result_id = %record.result_id, "Missing document restored");
                    report.repaired += 1;
                }
                Err(e) => {
                    tracing::error!(result_id = %record.result_id, error = %e, "Document repair failed");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
