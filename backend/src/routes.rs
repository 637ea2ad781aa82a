use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use shared::{validate_title, CreateTaskRequest, MessageBody, Stats, Task, UpdateTaskRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

/// Routes of the task service, relative to its base path.
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/stats", get(get_stats))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
        .route("/:id/toggle", patch(toggle_task))
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.store.list().await?))
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, AppError> {
    let tasks = state.store.list().await?;
    Ok(Json(Stats::from_tasks(&tasks)))
}

async fn get_task(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<Task>, AppError> {
    state.store.get(id).await?.map(Json).ok_or(AppError::NotFound)
}

async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let title = validate_title(&payload.title).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let description = payload.description.trim().to_string();

    let task = state
        .store
        .insert(Task::new(title.to_string(), Some(description)))
        .await?;
    tracing::info!(id = %task.id, "task created");
    Ok(Json(task))
}

async fn update_task(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(mut payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    if let Some(title) = payload.title.take() {
        let title = validate_title(&title).map_err(|e| AppError::BadRequest(e.to_string()))?;
        payload.title = Some(title.to_string());
    }
    payload.description = payload.description.map(|d| d.trim().to_string());
    state.store.update(id, payload).await?.map(Json).ok_or(AppError::NotFound)
}

async fn toggle_task(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<MessageBody>, AppError> {
    if !state.store.toggle(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(%id, "task toggled");
    Ok(Json(MessageBody {
        message: "status updated".to_string(),
    }))
}

async fn delete_task(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<MessageBody>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(%id, "task deleted");
    Ok(Json(MessageBody {
        message: "task deleted".to_string(),
    }))
}
