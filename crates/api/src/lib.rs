//! # Courtbook API
//!
//! The API crate provides the web server for the Courtbook venue and court
//! booking service: venue discovery, time-slot templates and their
//! projection onto dates, bookings and admin moderation.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Authentication and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the [`Store`] trait, so the same router runs against
//! Postgres in production and the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use courtbook_db::Store;
use eyre::{eyre, Result};
use std::future::Future;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, level_filters::LevelFilter, warn, Level};
use tracing_subscriber::EnvFilter;

/// Token signing settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&config::ApiConfig> for AuthSettings {
    fn from(config: &config::ApiConfig) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_hours: config.token_ttl_hours,
        }
    }
}

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use courtbook_api::{app, ApiState, AuthSettings};
/// use courtbook_db::memory::InMemoryStore;
///
/// let state = Arc::new(ApiState {
///     store: Arc::new(InMemoryStore::new()),
///     auth: AuthSettings { jwt_secret: "secret".into(), token_ttl_hours: 24 },
/// });
/// let router = app(state);
/// ```
pub struct ApiState {
    /// Data access for every repository
    pub store: Arc<dyn Store>,
    pub auth: AuthSettings,
}

/// All routes with shared state attached, without transport layers.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Registration, login and profile
        .merge(routes::auth::routes())
        // Venue discovery and management
        .merge(routes::venue::routes())
        // Courts and court bookings
        .merge(routes::court::routes())
        // Time-slot templates and availability
        .merge(routes::time_slot::routes())
        // Bookings of the current user
        .merge(routes::booking::routes())
        // Moderation
        .merge(routes::admin::routes())
        .fallback(middleware::error_handling::not_found)
        // Attach shared state to all routes
        .with_state(state)
}

/// [`app`] wrapped in tracing, timeout and (when configured) CORS layers.
pub fn build_router(state: Arc<ApiState>, config: &config::ApiConfig) -> Router {
    let router = app(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    match &config.cors_origins {
        Some(origins) => router.layer(cors_layer(origins)),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize tracing: {}", e))
}

/// Starts the API server and serves until `shutdown` resolves.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use courtbook_api::{config::ApiConfig, shutdown_signal, start_server};
/// use courtbook_db::{create_pool, PgStore};
///
/// let config = ApiConfig::from_env()?;
/// let pool = create_pool(&config.database_url, config.database_max_connections).await?;
/// start_server(config, Arc::new(PgStore::new(pool)), shutdown_signal()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server<F>(config: config::ApiConfig, store: Arc<dyn Store>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = Arc::new(ApiState {
        store,
        auth: AuthSettings::from(&config),
    });
    let app = build_router(state, &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
