//! Rendering Engines
//!
//! HTML to PDF conversion is delegated to an external engine:
//! - [`CommandRenderer`] pipes the page through a local binary
//!   (`wkhtmltopdf` by default)
//! - [`HttpRenderer`] posts it to a Gotenberg-compatible service

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::repository::DocumentRenderer;
use crate::error::{ResultError, ResultsResult};

/// Longest stderr excerpt carried into error messages
const STDERR_EXCERPT: usize = 512;

// ============================================================================
// Command Renderer
// ============================================================================

/// Runs an HTML-on-stdin, PDF-on-stdout command per render
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `wkhtmltopdf --quiet --page-size A4 --print-media-type - -`
    pub fn wkhtmltopdf(program: impl Into<String>) -> Self {
        let args = ["--quiet", "--page-size", "A4", "--print-media-type", "-", "-"]
            .into_iter()
            .map(String::from)
            .collect();
        Self::new(program, args)
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::wkhtmltopdf("wkhtmltopdf")
    }
}

impl DocumentRenderer for CommandRenderer {
    async fn render(&self, html: &str) -> ResultsResult<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The caller's timeout drops this future; the engine must die with it
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ResultError::Rendering(format!("failed to start {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ResultError::Rendering("renderer stdin unavailable".to_string()))?;
        let input = html.as_bytes().to_vec();
        let feed = async move {
            let written = stdin.write_all(&input).await;
            drop(stdin);
            written
        };

        // Feed and drain concurrently so a chatty engine cannot deadlock on a full pipe
        let (written, output) = tokio::join!(feed, child.wait_with_output());
        let output = output
            .map_err(|e| ResultError::Rendering(format!("{} did not complete: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let excerpt: String = stderr.chars().take(STDERR_EXCERPT).collect();
            return Err(ResultError::Rendering(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                excerpt.trim()
            )));
        }
        written.map_err(|e| ResultError::Rendering(format!("failed to send page: {e}")))?;

        if output.stdout.is_empty() {
            return Err(ResultError::Rendering(format!(
                "{} produced no output",
                self.program
            )));
        }

        Ok(output.stdout)
    }
}

// ============================================================================
// HTTP Renderer
// ============================================================================

/// Gotenberg route converting an uploaded `index.html` with Chromium
const GOTENBERG_HTML_ROUTE: &str = "/forms/chromium/convert/html";

/// Converts pages through a Gotenberg-compatible HTTP service
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenderer {
    /// `base_url` is the service root, e.g. `http://gotenberg:3000`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{GOTENBERG_HTML_ROUTE}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DocumentRenderer for HttpRenderer {
    async fn render(&self, html: &str) -> ResultsResult<Vec<u8>> {
        let page = reqwest::multipart::Part::bytes(html.as_bytes().to_vec())
            .file_name("index.html")
            .mime_str("text/html; charset=utf-8")
            .map_err(|e| ResultError::Rendering(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("files", page)
            .text("printBackground", "true")
            .text("paperWidth", "8.27")
            .text("paperHeight", "11.7");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ResultError::Rendering(format!("rendering service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResultError::Rendering(format!(
                "rendering service answered {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResultError::Rendering(format!("failed to read rendered document: {e}")))?;
        Ok(bytes.to_vec())
    }
}
