//! Request extractors that reject with [`AppError`]
//!
//! axum's own `Json` rejects with a plain-text 415/422 whose body quotes
//! serde internals. [`JsonBody`] turns every rejection into a 400 problem
//! body instead, naming the offending field when serde reports one.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::app_error::{AppError, FieldViolation};

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "JSON body rejected");
                Err(rejection_error(&rejection))
            }
        }
    }
}

fn rejection_error(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            let err = AppError::bad_request("Request body has fields of the wrong type")
                .with_action("Correct the listed fields and submit again");
            match mistyped_field(&rejection.body_text()) {
                Some(field) => err.with_violations(vec![FieldViolation::new(
                    field,
                    "has the wrong type",
                )]),
                None => err,
            }
        }
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request("Request body is not valid JSON"),
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Expected a JSON request body")
                .with_action("Send the body with Content-Type: application/json")
        }
        _ => AppError::bad_request("Request body could not be read"),
    }
}

/// Field path out of `"<summary>: <path>: <serde message>"`
///
/// Only a well-formed path (`semester`, `subjects[0].internalMarks`) is
/// returned; the serde message itself never reaches the client.
fn mistyped_field(text: &str) -> Option<&str> {
    let (_, detail) = text.split_once(": ")?;
    let (path, _) = detail.split_once(": ")?;

    let starts_with_letter = path.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let well_formed = path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));

    (starts_with_letter && well_formed).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct Form {
        student_name: Option<String>,
        semester: Option<i64>,
        #[serde(default)]
        subjects: Vec<Line>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct Line {
        internal_marks: Option<i64>,
    }

    fn request(body: &str, content_type: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn extract(body: &str) -> Result<JsonBody<Form>, AppError> {
        JsonBody::<Form>::from_request(request(body, Some("application/json")), &()).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let JsonBody(form) = extract(r#"{"studentName": "Asha", "semester": 3}"#)
            .await
            .unwrap();
        assert_eq!(form.student_name.as_deref(), Some("Asha"));
        assert_eq!(form.semester, Some(3));
    }

    #[tokio::test]
    async fn test_wrong_type_names_field() {
        let err = extract(r#"{"studentName": 5}"#).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.violations()[0].field, "studentName");

        let err = extract(r#"{"subjects": [{"internalMarks": {}}]}"#)
            .await
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "subjects[0].internalMarks");

        let body = err.problem_body().to_string();
        assert!(!body.contains("invalid type"));
        assert!(!body.contains("Form"));
    }

    #[tokio::test]
    async fn test_syntax_error_and_content_type() {
        let err = extract("{not json").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.violations().is_empty());

        let err = JsonBody::<Form>::from_request(request("{}", None), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_mistyped_field_parsing() {
        let prefix = "Failed to deserialize the JSON body into the target type";
        assert_eq!(
            mistyped_field(&format!("{prefix}: semester: invalid type: boolean `true`")),
            Some("semester")
        );
        assert_eq!(
            mistyped_field(&format!("{prefix}: .: invalid type: sequence, expected struct")),
            None
        );
        assert_eq!(mistyped_field(prefix), None);
    }
}
