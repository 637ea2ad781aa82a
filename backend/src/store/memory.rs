use async_trait::async_trait;
use shared::{Task, UpdateTaskRequest};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{apply_update, TaskStore};
use crate::error::StoreError;

/// Process-local store; insertion order is creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, update: UpdateTaskRequest) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            apply_update(task, update);
            task.clone()
        }))
    }

    async fn toggle(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str) -> Task {
        Task::new(title.to_string(), None)
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = MemoryStore::default();
        for title in ["first", "second", "third"] {
            store.insert(task(title)).await.unwrap();
        }

        let titles: Vec<_> = store.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn toggle_and_delete_report_missing_tasks() {
        let store = MemoryStore::default();
        let missing = Uuid::new_v4();
        assert!(!store.toggle(missing).await.unwrap());
        assert!(!store.delete(missing).await.unwrap());
        assert!(store.update(missing, UpdateTaskRequest::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let store = MemoryStore::default();
        let created = store
            .insert(Task::new("title".to_string(), Some("notes".to_string())))
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                UpdateTaskRequest {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "title");
        assert_eq!(updated.description.as_deref(), Some("notes"));
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
    }
}
