//! Domain Services
//!
//! The result sheet layout. The same markup is shown by the view endpoint
//! and handed to the rendering engine for the PDF.

use std::fmt::Write;

use kernel::id::ResultId;

use crate::domain::entities::ResultSheet;
use crate::domain::value_objects::DocumentHash;

const STYLE: &str = r#"
body { font-family: "DejaVu Sans", Arial, sans-serif; margin: 40px; color: #222; }
.header { text-align: center; border-bottom: 2px solid #1e1e2f; padding-bottom: 12px; }
.header h1 { margin: 0; font-size: 26px; }
.header h2 { margin: 6px 0 0; font-size: 16px; font-weight: normal; }
.student { display: flex; align-items: center; gap: 24px; margin: 24px 0; }
.student img { width: 110px; height: 130px; object-fit: cover; border: 1px solid #999; }
.student td { padding: 4px 12px 4px 0; }
table.marks { width: 100%; border-collapse: collapse; }
table.marks th, table.marks td { border: 1px solid #555; padding: 6px 10px; text-align: center; }
table.marks th { background: #eee; }
table.marks td.subject { text-align: left; }
tr.total td { font-weight: bold; }
.hash { margin-top: 28px; font-size: 11px; color: #555; word-break: break-all; }
"#;

/// Name of a record's document, on disk and in downloads
pub fn document_file_name(result_id: &ResultId) -> String {
    format!("result-{result_id}.pdf")
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Build the result sheet page
///
/// The PDF is rendered without `document_hash` (the hash is computed from
/// that PDF); the view passes it so readers can compare fingerprints.
/// Output depends only on the arguments.
pub fn render_result_sheet(
    sheet: &ResultSheet,
    institution_name: &str,
    document_hash: Option<&DocumentHash>,
) -> String {
    let mut rows = String::new();
    for subject in &sheet.subjects {
        // Writing into a String cannot fail
        let _ = write!(
            rows,
            r#"<tr><td>{code}</td><td class="subject">{name}</td><td>{internal}</td><td>{external}</td><td>{total}</td></tr>"#,
            code = escape_html(&subject.code),
            name = escape_html(&subject.name),
            internal = subject.internal_marks.get(),
            external = subject.external_marks.get(),
            total = subject.total(),
        );
    }

    let hash_block = document_hash
        .map(|hash| format!(r#"<p class="hash">Document SHA-256: {hash}</p>"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Result - {roll_no}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="header">
<h1>{institution}</h1>
<h2>Semester {semester} Examination Result</h2>
</div>
<div class="student">
<img src="{photo}" alt="Student photo">
<table>
<tr><td>Name</td><td><strong>{name}</strong></td></tr>
<tr><td>Roll No</td><td><strong>{roll_no}</strong></td></tr>
<tr><td>Semester</td><td><strong>{semester}</strong></td></tr>
</table>
</div>
<table class="marks">
<thead><tr><th>Code</th><th>Subject</th><th>Internal (50)</th><th>External (50)</th><th>Total (100)</th></tr></thead>
<tbody>
{rows}<tr class="total"><td colspan="4">Grand Total</td><td>{grand_total} / {max_total}</td></tr>
</tbody>
</table>
{hash_block}
</body>
</html>
"#,
        institution = escape_html(institution_name),
        semester = sheet.semester.get(),
        photo = escape_html(&sheet.photo_ref),
        name = escape_html(&sheet.student_name),
        roll_no = escape_html(sheet.roll_no.as_str()),
        grand_total = sheet.grand_total(),
        max_total = sheet.max_total(),
    )
}
