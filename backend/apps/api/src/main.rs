//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod renderer;

use auth::{
    AuthConfig, InMemoryAdminRepository, PgAdminRepository, TokenGuard, auth_router,
    auth_router_generic,
};
use axum::{
    Router,
    http::{Method, header},
};
use platform::throttle::InMemoryFailureCounter;
use results::{
    FsDocumentStore, InMemoryResultRepository, PgResultRepository, RepairDocumentsUseCase,
    ResultsConfig, results_router, results_router_generic,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::renderer::EngineRenderer;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,results=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let renderer = EngineRenderer::from_settings(&config.renderer);
    tracing::info!(renderer = ?config.renderer, "Rendering engine selected");

    let store = FsDocumentStore::new(config.results.documents_dir.clone());
    store.ensure_dir().await?;
    tracing::info!(dir = %store.dir().display(), "Document storage ready");

    let guard = TokenGuard::new(Arc::new(config.auth.clone()));

    let api = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let result_repo = PgResultRepository::new(pool.clone());

            // Startup reconciliation: restore documents lost after persist
            // Errors here should not prevent server startup
            repair_documents(&result_repo, &renderer, &store, &config.results).await;

            Router::new()
                .merge(auth_router(PgAdminRepository::new(pool), config.auth.clone()))
                .merge(results_router(
                    result_repo,
                    renderer,
                    config.results.clone(),
                    guard,
                ))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores (data is lost on exit)");
            in_memory_router(config.auth.clone(), renderer, store, config.results.clone(), guard)
        }
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = api.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let addr = config.bind_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn in_memory_router(
    auth_config: AuthConfig,
    renderer: EngineRenderer,
    store: FsDocumentStore,
    results_config: ResultsConfig,
    guard: TokenGuard,
) -> Router {
    let throttle = InMemoryFailureCounter::new(auth_config.lockout_window);
    Router::new()
        .merge(auth_router_generic(
            InMemoryAdminRepository::new(),
            throttle,
            auth_config,
        ))
        .merge(results_router_generic(
            InMemoryResultRepository::new(),
            renderer,
            store,
            results_config,
            guard,
        ))
}

async fn repair_documents(
    repo: &PgResultRepository,
    renderer: &EngineRenderer,
    store: &FsDocumentStore,
    config: &ResultsConfig,
) {
    let use_case = RepairDocumentsUseCase::new(
        Arc::new(repo.clone()),
        Arc::new(renderer.clone()),
        Arc::new(store.clone()),
        Arc::new(config.clone()),
    );

    match use_case.execute().await {
        Ok(report) => {
            tracing::info!(
                scanned = report.scanned,
                repaired = report.repaired,
                failed = report.failed,
                hash_mismatches = report.hash_mismatches,
                "Document reconciliation completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Document reconciliation failed, continuing anyway"
            );
        }
    }
}
