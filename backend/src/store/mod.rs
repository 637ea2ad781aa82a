use async_trait::async_trait;
use shared::{Task, UpdateTaskRequest};
use uuid::Uuid;

use crate::error::StoreError;

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// Persistence for tasks. Listing returns tasks in creation order.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError>;
    async fn insert(&self, task: Task) -> Result<Task, StoreError>;
    async fn update(&self, id: Uuid, update: UpdateTaskRequest) -> Result<Option<Task>, StoreError>;
    /// Flips `completed`. Returns `false` if the task does not exist.
    async fn toggle(&self, id: Uuid) -> Result<bool, StoreError>;
    /// Returns `false` if the task does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

pub(crate) fn apply_update(task: &mut Task, update: UpdateTaskRequest) {
    if let Some(title) = update.title {
        task.title = title;
    }
    if let Some(description) = update.description {
        task.description = Some(description).filter(|d| !d.is_empty());
    }
    if let Some(completed) = update.completed {
        task.completed = completed;
    }
}
