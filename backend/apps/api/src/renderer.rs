//! Rendering Engine Selection

use results::domain::repository::DocumentRenderer;
use results::{CommandRenderer, HttpRenderer, ResultsResult};

use crate::config::RendererSettings;

/// The engine picked at startup
#[derive(Debug, Clone)]
pub enum EngineRenderer {
    Command(CommandRenderer),
    Http(HttpRenderer),
}

impl EngineRenderer {
    pub fn from_settings(settings: &RendererSettings) -> Self {
        match settings {
            RendererSettings::Command { program } => {
                Self::Command(CommandRenderer::wkhtmltopdf(program.clone()))
            }
            RendererSettings::Http { base_url } => Self::Http(HttpRenderer::new(base_url)),
        }
    }
}

impl DocumentRenderer for EngineRenderer {
    async fn render(&self, html: &str) -> ResultsResult<Vec<u8>> {
        match self {
            Self::Command(renderer) => renderer.render(html).await,
            Self::Http(renderer) => renderer.render(html).await,
        }
    }
}
