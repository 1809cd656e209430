//! HTTP server implementation for the campaign manager API

use axum::{
    http::{
        header::{CONTENT_TYPE, AUTHORIZATION},
        Method,
    },
    routing::{get, post},
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::api_handlers;
use campaign_manager_core::{
    core::{factory::ConfiguredAppState, AppState},
    log_info,
    storage::StorageImpl,
};

/// Creates the main application router with all routes and middleware
pub fn create_router<S: StorageImpl>(app_state: Arc<AppState<S>>) -> Router {
    // Identity comes from a proxy header, so cross-origin callers get no credentials
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        // Entry page
        .route("/", get(api_handlers::index_page))

        // Bulk import, analysis and scripts
        .route("/api/import", post(api_handlers::import_csv::<S>))
        .route("/api/analysis", get(api_handlers::run_analysis::<S>))
        .route(
            "/api/analysis/trigger",
            post(api_handlers::create_trigger::<S>).delete(api_handlers::delete_trigger::<S>),
        )
        .route("/api/scripts", get(api_handlers::script_library))
        .route("/api/scripts/catalog", get(api_handlers::script_catalog))
        .route("/api/generate", post(api_handlers::generate_script::<S>))

        // Record collections
        .route(
            "/api/{tag}",
            get(api_handlers::list_records::<S>).post(api_handlers::add_record::<S>),
        )
        .route(
            "/api/{tag}/{id}",
            axum::routing::patch(api_handlers::update_record::<S>)
                .put(api_handlers::update_record::<S>)
                .delete(api_handlers::delete_record::<S>),
        )

        // System routes
        .route("/health", get(api_handlers::health_check))
        .route("/info", get(api_handlers::system_info::<S>))
        .fallback(api_handlers::not_found)

        // Apply middleware to ALL routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

/// Router for whichever backend the state was built with
pub fn router_for(configured_app_state: &ConfiguredAppState) -> Router {
    match configured_app_state {
        ConfiguredAppState::Memory { app_state } => create_router(app_state.clone()),
        ConfiguredAppState::File { app_state } => create_router(app_state.clone()),
    }
}

/// Internal function to start the server with the configured router
async fn serve_api_server_with_app<F>(addr: SocketAddr, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_info!("Server listening on http://{}", addr);
    log_info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Start the HTTP server with the configured AppState, stopping when
/// `shutdown` resolves
pub async fn start_api_server<F>(configured_app_state: &ConfiguredAppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let http_addr = configured_app_state.http_addr();
    log_info!(
        "Starting campaign manager API on {} with {:?} storage",
        http_addr,
        configured_app_state.storage_type()
    );
    serve_api_server_with_app(http_addr, router_for(configured_app_state), shutdown).await
}
