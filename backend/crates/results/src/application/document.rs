//! Document Rendering
//!
//! The one place the rendering engine is called, so every caller gets the
//! same layout and the same timeout.

use crate::application::config::ResultsConfig;
use crate::domain::entities::ResultSheet;
use crate::domain::repository::DocumentRenderer;
use crate::domain::services::render_result_sheet;
use crate::error::{ResultError, ResultsResult};

/// Render the PDF for a result sheet, bounded by `render_timeout`
///
/// On timeout the engine future is dropped, which cancels it.
pub async fn render_document<D>(
    renderer: &D,
    sheet: &ResultSheet,
    config: &ResultsConfig,
) -> ResultsResult<Vec<u8>>
where
    D: DocumentRenderer,
{
    let html = render_result_sheet(sheet, &config.institution_name, None);

    match tokio::time::timeout(config.render_timeout, renderer.render(&html)).await {
        Ok(rendered) => rendered,
        Err(_) => Err(ResultError::RenderTimeout(config.render_timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRenderer, SlowRenderer, record};
    use std::time::Duration;

    #[tokio::test]
    async fn test_render_is_deterministic() {
        let renderer = FakeRenderer::default();
        let config = ResultsConfig::default();
        let sheet = record("Asha", "CS01", 3).sheet;

        let first = render_document(&renderer, &sheet, &config).await.unwrap();
        let second = render_document(&renderer, &sheet, &config).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(renderer.calls(), 2);
    }

    #[tokio::test]
    async fn test_render_timeout() {
        let renderer = SlowRenderer(Duration::from_secs(60));
        let config = ResultsConfig {
            render_timeout: Duration::from_millis(20),
            ..ResultsConfig::default()
        };
        let sheet = record("Asha", "CS01", 3).sheet;

        let err = render_document(&renderer, &sheet, &config).await.unwrap_err();
        assert!(matches!(err, ResultError::RenderTimeout(_)));
    }
}
