//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clean_namespace_handler, delete_handler, exists_handler, get_handler, health_handler,
    reset_handler, restore_handler, save_handler, set_handler, stats_handler, sweep_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a value (optional namespace and TTL in the body)
/// - `GET /get/:key?namespace=` - Read a value, evicting it if expired
/// - `GET /exists/:key?namespace=` - Check presence without side effects
/// - `DELETE /del/:key?namespace=` - Delete a key
/// - `DELETE /namespace/:namespace` - Delete every identifier containing the namespace
/// - `POST /sweep` - Remove expired entries
/// - `POST /reset` - Drop all entries
/// - `POST /save` - Write the snapshot
/// - `POST /restore` - Replace memory with the snapshot
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/exists/:key", get(exists_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/namespace/:namespace", delete(clean_namespace_handler))
        .route("/sweep", post(sweep_handler))
        .route("/reset", post(reset_handler))
        .route("/save", post(save_handler))
        .route("/restore", post(restore_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
