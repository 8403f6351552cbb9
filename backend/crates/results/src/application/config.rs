//! Application Configuration
//!
//! Configuration for the Results application layer.

use std::path::PathBuf;
use std::time::Duration;

/// Results application configuration
#[derive(Debug, Clone)]
pub struct ResultsConfig {
    /// Heading printed on every result sheet
    pub institution_name: String,
    /// Directory holding `result-<id>.pdf` files
    pub documents_dir: PathBuf,
    /// Upper bound for one rendering engine call
    pub render_timeout: Duration,
    /// Largest accepted subject list
    pub max_subjects: usize,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            institution_name: "Your University Name".to_string(),
            documents_dir: PathBuf::from("results"),
            render_timeout: Duration::from_secs(30),
            max_subjects: 32,
        }
    }
}
