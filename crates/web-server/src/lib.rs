use axum::{extract::DefaultBodyLimit, routing::get, Router};
use concerns::ConcernService;
use configuration::{Settings, StoreBackend};
use database::{ConcernStore, DbRepository, InMemoryConcernStore};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub service: ConcernService,
}

impl AppState {
    pub fn new(store: Arc<dyn ConcernStore>) -> Self {
        Self { service: ConcernService::new(store) }
    }
}

/// Builds the router with every route and middleware layer.
pub fn app(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/concerns",
            get(handlers::list_concerns).post(handlers::create_concern),
        )
        .route(
            "/api/concerns/:id",
            get(handlers::get_concern)
                .put(handlers::update_concern)
                .delete(handlers::delete_concern),
        )
        .with_state(state)
        .layer(cors)
        // Logs every incoming request and its response status.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// Creates the store selected by `settings.store.backend`.
///
/// For Postgres this connects the pool and, unless disabled, applies the
/// migrations before returning.
pub async fn build_store(settings: &Settings) -> anyhow::Result<Arc<dyn ConcernStore>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; concerns will not survive a restart.");
            Ok(Arc::new(InMemoryConcernStore::new()))
        }
        StoreBackend::Postgres => {
            let db = &settings.database;
            let url = db.url.as_deref().unwrap_or_default();
            let pool = database::connect(url, db.max_connections, db.acquire_timeout()).await?;
            if db.run_migrations {
                database::run_migrations(&pool).await?;
            }
            Ok(Arc::new(DbRepository::new(pool)))
        }
    }
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let store = build_store(&settings).await?;
    let app_state = Arc::new(AppState::new(store));
    let router = app(app_state, settings.server.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(backend = ?settings.store.backend, "Web server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
