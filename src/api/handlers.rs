//! API Handlers
//!
//! HTTP request handlers exposing the cache engine.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::backing::{BackingStore, FileBackingStore};
use crate::cache::{build_namespaced_key, CacheEngine};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CleanNamespaceResponse, DeleteResponse, ExistsResponse, GetResponse, HealthResponse,
    MessageResponse, NamespaceQuery, PersistResponse, SetRequest, SetResponse, StatsResponse,
    SweepResponse,
};

/// Backing store handle shared by the host engine.
pub type DynBackingStore = Box<dyn BackingStore + Send + Sync>;

/// Engine type served over HTTP: JSON values, any backing store.
pub type HostEngine = CacheEngine<Value, DynBackingStore>;

/// Application state shared across all handlers.
///
/// Holds the one engine instance behind a single lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<HostEngine>>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(engine: HostEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Creates a new AppState from configuration, persisting to `snapshot_dir`.
    pub fn from_config(config: &Config) -> Self {
        let backing: DynBackingStore = Box::new(FileBackingStore::new(&config.snapshot_dir));
        Self::new(CacheEngine::with_default_ttl(backing, config.default_ttl))
    }

    /// Saves the snapshot on the blocking pool while holding the write lock.
    pub async fn save(&self) -> Result<PersistResponse> {
        let mut engine = self.engine.clone().write_owned().await;
        tokio::task::spawn_blocking(move || {
            let success = engine.save_to_disk();
            PersistResponse {
                success,
                entries: engine.size(),
            }
        })
        .await
        .map_err(|e| CacheError::Internal(format!("Snapshot save task failed: {}", e)))
    }

    /// Restores the snapshot on the blocking pool while holding the write lock.
    pub async fn restore(&self) -> Result<PersistResponse> {
        let mut engine = self.engine.clone().write_owned().await;
        tokio::task::spawn_blocking(move || {
            let success = engine.restore_from_disk();
            PersistResponse {
                success,
                entries: engine.size(),
            }
        })
        .await
        .map_err(|e| CacheError::Internal(format!("Snapshot restore task failed: {}", e)))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut engine = state.engine.write().await;
    engine.set(&req.key, req.value, req.namespace.as_deref(), req.ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Expired entries are evicted by the read and reported as not found.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<NamespaceQuery>,
) -> Result<Json<GetResponse>> {
    let namespace = query.namespace.filter(|ns| !ns.is_empty());

    // Write lock: the read may evict
    let mut engine = state.engine.write().await;
    match engine.get(&key, namespace.as_deref()) {
        Some(entry) => Ok(Json(GetResponse::new(key, namespace, entry))),
        None => Err(CacheError::NotFound(build_namespaced_key(
            &key,
            namespace.as_deref(),
        ))),
    }
}

/// Handler for GET /exists/:key
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<NamespaceQuery>,
) -> Json<ExistsResponse> {
    let engine = state.engine.read().await;
    let namespace = query.namespace.as_deref();

    Json(ExistsResponse {
        exists: engine.exists(&key, namespace),
        expired: engine.is_expired(&key, namespace),
        key,
    })
}

/// Handler for DELETE /del/:key
///
/// Deleting a missing key succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<NamespaceQuery>,
) -> Json<DeleteResponse> {
    let mut engine = state.engine.write().await;
    engine.delete(&key, query.namespace.as_deref());

    Json(DeleteResponse::new(key))
}

/// Handler for DELETE /namespace/:namespace
pub async fn clean_namespace_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Json<CleanNamespaceResponse> {
    let mut engine = state.engine.write().await;
    let removed = engine.clean_namespace(&namespace);

    Json(CleanNamespaceResponse { namespace, removed })
}

/// Handler for POST /sweep
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let mut engine = state.engine.write().await;
    let removed = engine.delete_outdated();

    Json(SweepResponse { removed })
}

/// Handler for POST /reset
pub async fn reset_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.engine.write().await.reset();
    info!("Cache reset over HTTP");

    Json(MessageResponse::new("Cache reset"))
}

/// Handler for POST /save
pub async fn save_handler(State(state): State<AppState>) -> Result<Json<PersistResponse>> {
    state.save().await.map(Json)
}

/// Handler for POST /restore
pub async fn restore_handler(State(state): State<AppState>) -> Result<Json<PersistResponse>> {
    state.restore().await.map(Json)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.read().await;
    Json(StatsResponse::from(engine.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
