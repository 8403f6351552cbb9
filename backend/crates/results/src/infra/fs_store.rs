//! Filesystem Document Store
//!
//! One file per record: `<dir>/result-<id>.pdf`. Writes go to a temporary
//! sibling first and are renamed into place, so readers never observe a
//! partial document.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use kernel::id::ResultId;

use crate::domain::repository::DocumentStore;
use crate::domain::services::document_file_name;
use crate::error::ResultsResult;

#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
}

impl FsDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the documents directory if needed
    pub async fn ensure_dir(&self) -> ResultsResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, result_id: &ResultId) -> PathBuf {
        self.dir.join(document_file_name(result_id))
    }
}

impl DocumentStore for FsDocumentStore {
    async fn write(&self, result_id: &ResultId, document: &[u8]) -> ResultsResult<()> {
        self.ensure_dir().await?;

        let target = self.path_for(result_id);
        let suffix = platform::crypto::random_hex(6);
        let temp = self.dir.join(format!(".{}.{suffix}.tmp", document_file_name(result_id)));

        if let Err(e) = tokio::fs::write(&temp, document).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::debug!(result_id = %result_id, bytes = document.len(), "Document stored");
        Ok(())
    }

    async fn read(&self, result_id: &ResultId) -> ResultsResult<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(result_id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, result_id: &ResultId) -> ResultsResult<bool> {
        Ok(tokio::fs::try_exists(self.path_for(result_id)).await?)
    }
}
