use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::session::LookupSession;

/// Full application router: `/api/*` plus a health check
pub fn app(session: Arc<LookupSession>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(session))
        .route("/health", get(|| async { "ok" }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

pub async fn run(server: &ServerConfig, session: Arc<LookupSession>) -> Result<()> {
    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::from)
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app(session))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::server(e.to_string()))?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::testing::StubGeocoder;
    use crate::lookup::LookupService;
    use crate::models::ReferencePoint;
    use crate::session::TracingPresenter;
    use std::time::Duration;

    fn session() -> Arc<LookupSession> {
        let service = LookupService::new(Arc::new(StubGeocoder::empty()), ReferencePoint::cesano());
        Arc::new(LookupSession::new(
            service,
            Arc::new(TracingPresenter),
            Duration::ZERO,
        ))
    }

    #[tokio::test]
    async fn test_bind_failure_is_io_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
        };

        let err = run(&server, session()).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Io { .. })));
        assert!(err.to_string().starts_with("Failed to bind 127.0.0.1:"));
    }
}
