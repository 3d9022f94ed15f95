//! Application startup and lifecycle management.

use crate::config::CounterConfig;
use crate::handlers::counter::{get_counter, method_not_allowed};
use crate::handlers::health::{health_check, metrics_handler, readiness_check};
use crate::prompt::PromptTemplate;
use crate::services::metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Path the counter lookup is served on.
pub const COUNTER_PATH: &str = "/api/get-counter";

/// Alias matching the serverless function layout.
pub const FUNCTION_PATH: &str = "/.netlify/functions/get-counter";

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
    pub prompt: Arc<PromptTemplate>,
}

impl AppState {
    pub fn new(text_provider: Arc<dyn TextProvider>, prompt: PromptTemplate) -> Self {
        Self {
            text_provider,
            prompt: Arc::new(prompt),
        }
    }
}

/// POST looks up counters; every other verb gets a 405.
fn counter_route() -> MethodRouter<AppState> {
    post(get_counter).fallback(method_not_allowed)
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(COUNTER_PATH, counter_route())
        .route(FUNCTION_PATH, counter_route())
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CounterConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            base_url: config.gemini.base_url.clone(),
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(
            GeminiTextProvider::new(gemini_config)
                .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?,
        );

        tracing::info!(
            base_url = %config.gemini.base_url,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: CounterConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        metrics::init_metrics();

        let state = AppState::new(text_provider, config.prompt.clone());

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Counter service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
