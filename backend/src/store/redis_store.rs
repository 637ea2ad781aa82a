use async_trait::async_trait;
use redis::{aio::Connection, AsyncCommands, Client};
use shared::{Task, UpdateTaskRequest};
use uuid::Uuid;

use super::{apply_update, TaskStore};
use crate::error::StoreError;

/// Tasks stored as JSON under `task:{id}`.
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::open(url)?,
        })
    }

    async fn connection(&self) -> Result<Connection, StoreError> {
        Ok(self.client.get_async_connection().await?)
    }

    fn key(id: Uuid) -> String {
        format!("task:{}", id)
    }

    async fn load(conn: &mut Connection, key: &str) -> Result<Option<Task>, StoreError> {
        let task_json: Option<String> = conn.get(key).await?;
        match task_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(conn: &mut Connection, task: &Task) -> Result<(), StoreError> {
        let task_json = serde_json::to_string(task)?;
        conn.set::<_, _, ()>(Self::key(task.id), task_json).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for RedisStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = conn.keys("task:*").await?;

        let mut tasks = Vec::with_capacity(keys.len());
        for key in keys {
            match Self::load(&mut conn, &key).await {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => {}
                Err(StoreError::Serde(e)) => tracing::warn!(%key, error = %e, "skipping unreadable task"),
                Err(e) => return Err(e),
            }
        }

        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let mut conn = self.connection().await?;
        Self::load(&mut conn, &Self::key(id)).await
    }

    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let mut conn = self.connection().await?;
        Self::save(&mut conn, &task).await?;
        Ok(task)
    }

    async fn update(&self, id: Uuid, update: UpdateTaskRequest) -> Result<Option<Task>, StoreError> {
        let mut conn = self.connection().await?;
        let Some(mut task) = Self::load(&mut conn, &Self::key(id)).await? else {
            return Ok(None);
        };
        apply_update(&mut task, update);
        Self::save(&mut conn, &task).await?;
        Ok(Some(task))
    }

    async fn toggle(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let Some(mut task) = Self::load(&mut conn, &Self::key(id)).await? else {
            return Ok(false);
        };
        task.completed = !task.completed;
        Self::save(&mut conn, &task).await?;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let deleted: usize = conn.del(Self::key(id)).await?;
        Ok(deleted > 0)
    }
}
