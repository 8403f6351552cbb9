//! Test doubles shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kernel::id::ResultId;

use crate::domain::entities::{ResultRecord, ResultSheet, SubjectInput, SubmissionInput};
use crate::domain::repository::{DocumentRenderer, DocumentStore};
use crate::domain::value_objects::DocumentHash;
use crate::error::{ResultError, ResultsResult};

pub fn submission(name: &str, roll_no: &str, semester: i64) -> SubmissionInput {
    SubmissionInput {
        student_name: name.to_string(),
        roll_no: roll_no.to_string(),
        semester: Some(semester),
        photo: "https://cdn.example.edu/photo.jpg".to_string(),
        subjects: vec![SubjectInput {
            code: "101".to_string(),
            name: "Math".to_string(),
            internal_marks: Some(40),
            external_marks: Some(45),
        }],
    }
}

pub fn record(name: &str, roll_no: &str, semester: i64) -> ResultRecord {
    let sheet = ResultSheet::parse(submission(name, roll_no, semester), 32).unwrap();
    ResultRecord::new(sheet, DocumentHash::of(name.as_bytes()))
}

/// Deterministic engine: a PDF-looking prefix followed by the page
#[derive(Debug, Default)]
pub struct FakeRenderer {
    calls: AtomicUsize,
}

impl FakeRenderer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentRenderer for FakeRenderer {
    async fn render(&self, html: &str) -> ResultsResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.extend_from_slice(html.as_bytes());
        Ok(bytes)
    }
}

#[derive(Debug, Default)]
pub struct FailingRenderer;

impl DocumentRenderer for FailingRenderer {
    async fn render(&self, _html: &str) -> ResultsResult<Vec<u8>> {
        Err(ResultError::Rendering("engine crashed".to_string()))
    }
}

/// Never finishes within any reasonable timeout
#[derive(Debug)]
pub struct SlowRenderer(pub Duration);

impl DocumentRenderer for SlowRenderer {
    async fn render(&self, _html: &str) -> ResultsResult<Vec<u8>> {
        tokio::time::sleep(self.0).await;
        Ok(b"%PDF-late".to_vec())
    }
}

/// Storage that accepts nothing
#[derive(Debug, Default)]
pub struct FailingStore;

impl DocumentStore for FailingStore {
    async fn write(&self, _result_id: &ResultId, _document: &[u8]) -> ResultsResult<()> {
        Err(std::io::Error::other("disk full").into())
    }

    async fn read(&self, _result_id: &ResultId) -> ResultsResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn exists(&self, _result_id: &ResultId) -> ResultsResult<bool> {
        Ok(false)
    }
}
