//! PostgreSQL Result Store
//!
//! Subjects are stored as a JSONB array on the record row. Uniqueness of
//! (roll_no, semester) is a table constraint; violations surface as
//! `ResultError::DuplicateResult`.

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::ResultId;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{ResultRecord, ResultSheet, Subject};
use crate::domain::repository::ResultRepository;
use crate::domain::value_objects::{DocumentHash, Marks, RollNo, Semester};
use crate::error::{ResultError, ResultsResult};

const SELECT_COLUMNS: &str = r#"
    SELECT
        result_id,
        student_name,
        roll_no,
        semester,
        photo_ref,
        subjects,
        document_hash,
        created_at
    FROM student_results
"#;

/// PostgreSQL-backed Result Store
#[derive(Clone)]
pub struct PgResultRepository {
    pool: PgPool,
}

impl PgResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ResultRepository for PgResultRepository {
    async fn insert(&self, record: &ResultRecord) -> ResultsResult<()> {
        let subjects: Vec<SubjectDoc> = record.sheet.subjects.iter().map(SubjectDoc::from).collect();

        sqlx::query(
            r#"
            INSERT INTO student_results (
                result_id,
                student_name,
                roll_no,
                semester,
                photo_ref,
                subjects,
                document_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.result_id.as_uuid())
        .bind(&record.sheet.student_name)
        .bind(record.sheet.roll_no.as_str())
        .bind(i16::from(record.sheet.semester))
        .bind(&record.sheet.photo_ref)
        .bind(Json(subjects))
        .bind(record.document_hash.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ResultError::DuplicateResult
            } else {
                ResultError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, result_id: &ResultId) -> ResultsResult<Option<ResultRecord>> {
        let row = sqlx::query_as::<_, ResultRow>(&format!("{SELECT_COLUMNS} WHERE result_id = $1"))
            .bind(result_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ResultRow::into_record).transpose()
    }

    async fn exists_by_roll_semester(
        &self,
        roll_no: &RollNo,
        semester: Semester,
    ) -> ResultsResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM student_results WHERE roll_no = $1 AND semester = $2
            )
            "#,
        )
        .bind(roll_no.as_str())
        .bind(i16::from(semester))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_name_and_roll(
        &self,
        name_fragment: &str,
        roll_no: &RollNo,
    ) -> ResultsResult<Option<ResultRecord>> {
        // strpos keeps the fragment literal (no LIKE wildcards)
        let row = sqlx::query_as::<_, ResultRow>(&format!(
            "{SELECT_COLUMNS} WHERE roll_no = $1 AND strpos(lower(student_name), lower($2)) > 0 \
             ORDER BY created_at, result_id LIMIT 1"
        ))
        .bind(roll_no.as_str())
        .bind(name_fragment)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ResultRow::into_record).transpose()
    }

    async fn list_all(&self) -> ResultsResult<Vec<ResultRecord>> {
        let rows = sqlx::query_as::<_, ResultRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at, result_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ResultRow::into_record).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// JSONB shape of one subject
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectDoc {
    code: String,
    name: String,
    internal_marks: i64,
    external_marks: i64,
}

impl From<&Subject> for SubjectDoc {
    fn from(subject: &Subject) -> Self {
        Self {
            code: subject.code.clone(),
            name: subject.name.clone(),
            internal_marks: i64::from(subject.internal_marks.get()),
            external_marks: i64::from(subject.external_marks.get()),
        }
    }
}

impl SubjectDoc {
    fn into_subject(self) -> ResultsResult<Subject> {
        let marks = |value: i64| {
            Marks::new(value)
                .ok_or_else(|| ResultError::Internal(format!("Stored marks out of range: {value}")))
        };
        Ok(Subject {
            internal_marks: marks(self.internal_marks)?,
            external_marks: marks(self.external_marks)?,
            code: self.code,
            name: self.name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ResultRow {
    result_id: Uuid,
    student_name: String,
    roll_no: String,
    semester: i16,
    photo_ref: String,
    subjects: Json<Vec<SubjectDoc>>,
    document_hash: String,
    created_at: DateTime<Utc>,
}

impl ResultRow {
    fn into_record(self) -> ResultsResult<ResultRecord> {
        let semester = Semester::new(i64::from(self.semester)).ok_or_else(|| {
            ResultError::Internal(format!("Stored semester out of range: {}", self.semester))
        })?;
        let document_hash = DocumentHash::from_hex(self.document_hash.trim()).ok_or_else(|| {
            ResultError::Internal(format!("Malformed document hash for {}", self.result_id))
        })?;
        let subjects = self
            .subjects
            .0
            .into_iter()
            .map(SubjectDoc::into_subject)
            .collect::<ResultsResult<Vec<_>>>()?;

        Ok(ResultRecord {
            result_id: ResultId::from_uuid(self.result_id),
            sheet: ResultSheet {
                student_name: self.student_name,
                roll_no: RollNo::from_normalized(self.roll_no),
                semester,
                photo_ref: self.photo_ref,
                subjects,
            },
            document_hash,
            created_at: self.created_at,
        })
    }
}
