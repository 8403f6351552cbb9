//! Server Configuration
//!
//! Everything the binary needs, read from environment variables (a `.env`
//! file is loaded first by `main`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;
use results::ResultsConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_RENDERER_COMMAND: &str = "wkhtmltopdf";

/// Which rendering engine turns result sheets into PDFs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererSettings {
    /// Local HTML-on-stdin, PDF-on-stdout program
    Command { program: String },
    /// Gotenberg-compatible HTTP service
    Http { base_url: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `None` runs on in-memory stores
    pub database_url: Option<String>,
    pub auth: AuthConfig,
    pub results: ResultsConfig,
    pub renderer: RendererSettings,
    pub frontend_origins: Vec<HeaderValue>,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let auth = auth_config(var("TOKEN_SECRET"), var("PASSWORD_PEPPER"))?;
        let auth = match var("LOCKOUT_WINDOW_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .context("LOCKOUT_WINDOW_SECS must be a whole number of seconds")?;
                AuthConfig {
                    lockout_window: (secs > 0).then(|| Duration::from_secs(secs)),
                    ..auth
                }
            }
            None => auth,
        };

        let mut results = ResultsConfig::default();
        if let Some(dir) = var("DOCUMENTS_DIR") {
            results.documents_dir = PathBuf::from(dir);
        }
        if let Some(name) = var("INSTITUTION_NAME") {
            results.institution_name = name;
        }
        if let Some(raw) = var("RENDER_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .context("RENDER_TIMEOUT_SECS must be a whole number of seconds")?;
            if secs == 0 {
                bail!("RENDER_TIMEOUT_SECS must be greater than zero");
            }
            results.render_timeout = Duration::from_secs(secs);
        }

        let renderer = match var("RENDERER").as_deref().map(str::trim) {
            None | Some("command") => RendererSettings::Command {
                program: var("RENDERER_COMMAND")
                    .unwrap_or_else(|| DEFAULT_RENDERER_COMMAND.to_string()),
            },
            Some("http") => RendererSettings::Http {
                base_url: var("RENDERER_URL")
                    .context("RENDERER_URL must be set when RENDERER=http")?,
            },
            Some(other) => bail!("Unknown RENDERER {other:?} (expected \"command\" or \"http\")"),
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        Ok(Self {
            database_url: var("DATABASE_URL"),
            auth,
            results,
            renderer,
            frontend_origins,
            bind_addr,
        })
    }
}

/// Token secret from base64; debug builds fall back to a random secret
fn auth_config(secret_b64: Option<String>, pepper: Option<String>) -> anyhow::Result<AuthConfig> {
    let mut config = match secret_b64 {
        Some(secret_b64) => {
            let secret_bytes = general_purpose::STANDARD
                .decode(secret_b64.trim())
                .context("TOKEN_SECRET must be base64")?;
            let secret: [u8; 32] = secret_bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| {
                    anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes (got {})", bytes.len())
                })?;
            AuthConfig {
                token_secret: secret,
                ..AuthConfig::default()
            }
        }
        None if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set, using a random secret for this process");
            AuthConfig::development()
        }
        None => bail!("TOKEN_SECRET must be set in production"),
    };

    config.password_pepper = pepper.map(String::into_bytes);
    Ok(config)
}
