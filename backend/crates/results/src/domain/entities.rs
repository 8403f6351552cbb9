//! Domain Entities
//!
//! Core business entities for the results domain.

use chrono::{DateTime, Utc};
use kernel::error::app_error::FieldViolation;
use kernel::id::ResultId;

use crate::domain::value_objects::{DocumentHash, Marks, RollNo, Semester};

const NAME_MAX_CHARS: usize = 200;
const PHOTO_MAX_CHARS: usize = 2048;
const SUBJECT_CODE_MAX_CHARS: usize = 32;

/// One subject row of a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub code: String,
    pub name: String,
    pub internal_marks: Marks,
    pub external_marks: Marks,
}

impl Subject {
    pub fn total(&self) -> u16 {
        u16::from(self.internal_marks.get()) + u16::from(self.external_marks.get())
    }
}

/// Validated content of a result: everything the document is rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSheet {
    pub student_name: String,
    pub roll_no: RollNo,
    pub semester: Semester,
    pub photo_ref: String,
    pub subjects: Vec<Subject>,
}

impl ResultSheet {
    /// Normalize and validate a submission
    ///
    /// Every offending field is reported, not just the first.
    pub fn parse(input: SubmissionInput, max_subjects: usize) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let student_name = input.student_name.trim().to_string();
        if student_name.is_empty() {
            violations.push(FieldViolation::new("studentName", "is required"));
        } else if student_name.chars().count() > NAME_MAX_CHARS {
            violations.push(FieldViolation::new(
                "studentName",
                "must be at most 200 characters",
            ));
        }

        let roll_no = RollNo::parse(&input.roll_no)
            .map_err(|reason| violations.push(FieldViolation::new("rollNo", reason)))
            .ok();

        let semester = input.semester.and_then(Semester::new);
        if semester.is_none() {
            violations.push(FieldViolation::new(
                "semester",
                "must be a whole number between 1 and 8",
            ));
        }

        let photo_ref = input.photo.trim().to_string();
        if photo_ref.is_empty() {
            violations.push(FieldViolation::new("photo", "is required"));
        } else if photo_ref.chars().count() > PHOTO_MAX_CHARS {
            violations.push(FieldViolation::new("photo", "must be at most 2048 characters"));
        }

        if input.subjects.is_empty() {
            violations.push(FieldViolation::new("subjects", "at least one subject is required"));
        } else if input.subjects.len() > max_subjects {
            violations.push(FieldViolation::new(
                "subjects",
                format!("at most {max_subjects} subjects are allowed"),
            ));
        }

        let subjects: Vec<Option<Subject>> = input
            .subjects
            .into_iter()
            .enumerate()
            .map(|(index, subject)| parse_subject(index, subject, &mut violations))
            .collect();

        match (roll_no, semester) {
            (Some(roll_no), Some(semester)) if violations.is_empty() => Ok(Self {
                student_name,
                roll_no,
                semester,
                photo_ref,
                subjects: subjects.into_iter().flatten().collect(),
            }),
            _ => Err(violations),
        }
    }

    pub fn grand_total(&self) -> u32 {
        self.subjects.iter().map(|s| u32::from(s.total())).sum()
    }

    pub fn max_total(&self) -> u32 {
        self.subjects.len() as u32 * 2 * u32::from(Marks::MAX)
    }
}

fn parse_subject(
    index: usize,
    input: SubjectInput,
    violations: &mut Vec<FieldViolation>,
) -> Option<Subject> {
    let field = |name: &str| format!("subjects[{index}].{name}");
    let before = violations.len();

    let code = input.code.trim().to_string();
    if code.is_empty() {
        violations.push(FieldViolation::new(field("code"), "is required"));
    } else if code.chars().count() > SUBJECT_CODE_MAX_CHARS {
        violations.push(FieldViolation::new(field("code"), "must be at most 32 characters"));
    }

    let name = input.name.trim().to_string();
    if name.is_empty() {
        violations.push(FieldViolation::new(field("name"), "is required"));
    } else if name.chars().count() > NAME_MAX_CHARS {
        violations.push(FieldViolation::new(field("name"), "must be at most 200 characters"));
    }

    let internal_marks = input.internal_marks.and_then(Marks::new);
    if internal_marks.is_none() {
        violations.push(FieldViolation::new(
            field("internalMarks"),
            "must be a whole number between 0 and 50",
        ));
    }

    let external_marks = input.external_marks.and_then(Marks::new);
    if external_marks.is_none() {
        violations.push(FieldViolation::new(
            field("externalMarks"),
            "must be a whole number between 0 and 50",
        ));
    }

    if violations.len() != before {
        return None;
    }
    Some(Subject {
        code,
        name,
        internal_marks: internal_marks?,
        external_marks: external_marks?,
    })
}

/// Stored result: one student, one semester
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub result_id: ResultId,
    pub sheet: ResultSheet,
    pub document_hash: DocumentHash,
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(sheet: ResultSheet, document_hash: DocumentHash) -> Self {
        Self {
            result_id: ResultId::new(),
            sheet,
            document_hash,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Submission input (not yet validated)
// ============================================================================

/// Raw submission as received
///
/// Numeric fields are `None` when absent or not a whole number.
#[derive(Debug, Clone, Default)]
pub struct SubmissionInput {
    pub student_name: String,
    pub roll_no: String,
    pub semester: Option<i64>,
    pub photo: String,
    pub subjects: Vec<SubjectInput>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectInput {
    pub code: String,
    pub name: String,
    pub internal_marks: Option<i64>,
    pub external_marks: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(internal: i64, external: i64) -> SubjectInput {
        SubjectInput {
            code: "101".to_string(),
            name: "Math".to_string(),
            internal_marks: Some(internal),
            external_marks: Some(external),
        }
    }

    fn input(subjects: Vec<SubjectInput>) -> SubmissionInput {
        SubmissionInput {
            student_name: "  Asha ".to_string(),
            roll_no: "cs01".to_string(),
            semester: Some(3),
            photo: "https://cdn.example.edu/asha.jpg".to_string(),
            subjects,
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_submission_is_normalized() {
        let sheet = ResultSheet::parse(input(vec![subject(40, 45)]), 32).unwrap();
        assert_eq!(sheet.student_name, "Asha");
        assert_eq!(sheet.roll_no.as_str(), "CS01");
        assert_eq!(sheet.semester.get(), 3);
        assert_eq!(sheet.subjects[0].total(), 85);
        assert_eq!(sheet.grand_total(), 85);
        assert_eq!(sheet.max_total(), 100);
    }

    #[test]
    fn test_mark_boundaries() {
        assert!(ResultSheet::parse(input(vec![subject(50, 0)]), 32).is_ok());

        let violations = ResultSheet::parse(input(vec![subject(51, 10)]), 32).unwrap_err();
        assert_eq!(fields(&violations), vec!["subjects[0].internalMarks"]);

        let violations = ResultSheet::parse(input(vec![subject(10, -1)]), 32).unwrap_err();
        assert_eq!(fields(&violations), vec!["subjects[0].externalMarks"]);
    }

    #[test]
    fn test_all_violations_reported() {
        let raw = SubmissionInput {
            student_name: "   ".to_string(),
            roll_no: "cs-01".to_string(),
            semester: Some(9),
            photo: String::new(),
            subjects: vec![subject(10, 10), SubjectInput::default()],
        };
        let violations = ResultSheet::parse(raw, 32).unwrap_err();
        assert_eq!(
            fields(&violations),
            vec![
                "studentName",
                "rollNo",
                "semester",
                "photo",
                "subjects[1].code",
                "subjects[1].name",
                "subjects[1].internalMarks",
                "subjects[1].externalMarks",
            ]
        );
    }

    #[test]
    fn test_subject_count_limits() {
        let violations = ResultSheet::parse(input(vec![]), 32).unwrap_err();
        assert_eq!(fields(&violations), vec!["subjects"]);

        let many = (0..3).map(|_| subject(1, 1)).collect();
        let violations = ResultSheet::parse(input(many), 2).unwrap_err();
        assert_eq!(fields(&violations), vec!["subjects"]);
    }

    #[test]
    fn test_missing_semester() {
        let mut raw = input(vec![subject(1, 1)]);
        raw.semester = None;
        let violations = ResultSheet::parse(raw, 32).unwrap_err();
        assert_eq!(fields(&violations), vec!["semester"]);
    }
}
