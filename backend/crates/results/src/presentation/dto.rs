//! API DTOs (Data Transfer Objects)
//!
//! The admin form posts numbers as strings, so numeric fields accept both.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{SubjectInput, SubmissionInput};

/// JSON number or numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    /// Whole-number value; `None` for fractions and non-numeric text
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                    .map(|f| f as i64)
            }),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

// ============================================================================
// Submit Result
// ============================================================================

/// Submit result request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    pub student_name: Option<String>,
    pub roll_no: Option<String>,
    pub semester: Option<NumberOrString>,
    pub photo: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub internal_marks: Option<NumberOrString>,
    pub external_marks: Option<NumberOrString>,
}

impl From<SubmitResultRequest> for SubmissionInput {
    fn from(req: SubmitResultRequest) -> Self {
        Self {
            student_name: req.student_name.unwrap_or_default(),
            roll_no: req.roll_no.unwrap_or_default(),
            semester: req.semester.as_ref().and_then(NumberOrString::as_integer),
            photo: req.photo.unwrap_or_default(),
            subjects: req.subjects.into_iter().map(SubjectInput::from).collect(),
        }
    }
}

impl From<SubjectRequest> for SubjectInput {
    fn from(req: SubjectRequest) -> Self {
        Self {
            code: req.code.unwrap_or_default(),
            name: req.name.unwrap_or_default(),
            internal_marks: req.internal_marks.as_ref().and_then(NumberOrString::as_integer),
            external_marks: req.external_marks.as_ref().and_then(NumberOrString::as_integer),
        }
    }
}

/// Submit result response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultResponse {
    pub message: String,
    pub student_id: String,
    pub hash: String,
}

// ============================================================================
// Find Student
// ============================================================================

/// Find student request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindStudentRequest {
    pub student_name: Option<String>,
    pub roll_no: Option<String>,
}

/// Find student response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindStudentResponse {
    pub student_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_or_string() {
        let parse = |json: &str| {
            serde_json::from_str::<NumberOrString>(json)
                .unwrap()
                .as_integer()
        };
        assert_eq!(parse("3"), Some(3));
        assert_eq!(parse("3.0"), Some(3));
        assert_eq!(parse("3.5"), None);
        assert_eq!(parse(r#""3""#), Some(3));
        assert_eq!(parse(r#"" 45 ""#), Some(45));
        assert_eq!(parse(r#""-1""#), Some(-1));
        assert_eq!(parse(r#""abc""#), None);
        assert_eq!(parse(r#""""#), None);
    }

    #[test]
    fn test_form_payload_converts() {
        let req: SubmitResultRequest = serde_json::from_value(serde_json::json!({
            "studentName": "Asha",
            "rollNo": "cs01",
            "semester": "3",
            "photo": "url",
            "subjects": [{"code": "101", "name": "Math", "internalMarks": "40", "externalMarks": 45}]
        }))
        .unwrap();
        let input = SubmissionInput::from(req);
        assert_eq!(input.semester, Some(3));
        assert_eq!(input.subjects[0].internal_marks, Some(40));
        assert_eq!(input.subjects[0].external_marks, Some(45));
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let req: SubmitResultRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        let input = SubmissionInput::from(req);
        assert!(input.student_name.is_empty());
        assert!(input.semester.is_none());
        assert!(input.subjects.is_empty());
    }
}
