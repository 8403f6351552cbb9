//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::{Extension, Json};
use std::sync::Arc;

use auth::AuthenticatedAdmin;
use kernel::extract::JsonBody;
use kernel::id::ResultId;

use crate::application::config::ResultsConfig;
use crate::application::{
    DownloadDocumentUseCase, FindStudentInput, FindStudentUseCase, SubmitResultUseCase,
    ViewResultUseCase,
};
use crate::domain::repository::{DocumentRenderer, DocumentStore, ResultRepository};
use crate::error::{ResultError, ResultsResult};
use crate::presentation::dto::{
    FindStudentRequest, FindStudentResponse, SubmitResultRequest, SubmitResultResponse,
};

/// Shared state for results handlers
pub struct ResultsAppState<R, D, S>
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub renderer: Arc<D>,
    pub store: Arc<S>,
    pub config: Arc<ResultsConfig>,
}

impl<R, D, S> Clone for ResultsAppState<R, D, S>
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            renderer: self.renderer.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

/// Malformed ids cannot name a record
fn parse_result_id(raw: &str) -> ResultsResult<ResultId> {
    raw.parse().map_err(|_| ResultError::NotFound)
}

// ============================================================================
// Submit Result (requires token)
// ============================================================================

/// POST /submit-result
pub async fn submit_result<R, D, S>(
    State(state): State<ResultsAppState<R, D, S>>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    JsonBody(req): JsonBody<SubmitResultRequest>,
) -> ResultsResult<Json<SubmitResultResponse>>
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let use_case = SubmitResultUseCase::new(
        state.repo.clone(),
        state.renderer.clone(),
        state.store.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.into(), admin.admin_id).await?;

    Ok(Json(SubmitResultResponse {
        message: "Result saved and PDF + hash generated successfully".to_string(),
        student_id: output.result_id.to_string(),
        hash: output.document_hash.to_string(),
    }))
}

// ============================================================================
// View Result
// ============================================================================

/// GET /student/{id}/result
pub async fn view_result<R, D, S>(
    State(state): State<ResultsAppState<R, D, S>>,
    Path(id): Path<String>,
) -> ResultsResult<Html<String>>
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let result_id = parse_result_id(&id)?;
    let use_case = ViewResultUseCase::new(state.repo.clone(), state.config.clone());

    Ok(Html(use_case.execute(&result_id).await?))
}

// ============================================================================
// Download PDF
// ============================================================================

/// GET /download-pdf/{id}
pub async fn download_pdf<R, D, S>(
    State(state): State<ResultsAppState<R, D, S>>,
    Path(id): Path<String>,
) -> ResultsResult<impl IntoResponse>
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let result_id = parse_result_id(&id)?;
    let use_case = DownloadDocumentUseCase::new(
        state.repo.clone(),
        state.renderer.clone(),
        state.store.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(&result_id).await?;
    let disposition = format!("attachment; filename=\"{}\"", output.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        output.document,
    ))
}

// ============================================================================
// Find Student
// ============================================================================

/// POST /find-student
pub async fn find_student<R, D, S>(
    State(state): State<ResultsAppState<R, D, S>>,
    JsonBody(req): JsonBody<FindStudentRequest>,
) -> ResultsResult<Json<FindStudentResponse>>
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let use_case = FindStudentUseCase::new(state.repo.clone());

    let input = FindStudentInput {
        student_name: req.student_name.unwrap_or_default(),
        roll_no: req.roll_no.unwrap_or_default(),
    };

    let result_id = use_case.execute(input).await?;

    Ok(Json(FindStudentResponse {
        student_id: result_id.to_string(),
    }))
}
