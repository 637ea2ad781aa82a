use std::path::Path;

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, StoreError};
pub use routes::AppState;
pub use store::{MemoryStore, RedisStore, TaskStore};

/// Base path of the task API.
pub const API_BASE: &str = "/api/todos";

/// The task API alone, mounted at [`API_BASE`].
pub fn api(state: AppState) -> Router {
    Router::new()
        .nest(API_BASE, routes::task_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The task API plus the compiled frontend served from `static_dir`.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    api(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
}
