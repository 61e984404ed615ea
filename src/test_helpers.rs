use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::{
    clock::FixedClock,
    config::AppConfig,
    db::{
        NewTodo, Todo, TodoRepository,
        dao::{DaoLayerError, DaoResult},
    },
    routes::app,
    services::ServiceContext,
    state::AppState,
};

/// Wednesday 2026-10-14 09:30 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0)
        .single()
        .expect("fixed timestamp should be valid")
}

/// `TodoRepository` kept in process memory, with the same filtering rules as
/// the database one.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    inner: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Todo>,
}

impl InMemoryTodoRepository {
    pub async fn snapshot(&self) -> Vec<Todo> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    /// Inserts a row as-is, bypassing validation. Useful for past expiries or
    /// finished todos.
    pub async fn insert(&self, todo: Todo) {
        let mut store = self.inner.write().await;
        store.next_id = store.next_id.max(todo.id);
        store.rows.insert(todo.id, todo);
    }
}

fn not_found(id: i64) -> DaoLayerError {
    DaoLayerError::NotFound { entity: "Todo", id }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> DaoResult<Todo> {
        let mut store = self.inner.write().await;
        store.next_id += 1;
        let todo = Todo {
            id: store.next_id,
            title: new_todo.title,
            description: new_todo.description,
            completion: 0.0,
            expiry: new_todo.expiry,
            is_done: false,
        };
        store.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        Ok(self.snapshot().await)
    }

    async fn find_by_expiry_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> DaoResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|todo| !todo.is_done && todo.expiry >= start && todo.expiry <= end)
            .cloned()
            .collect();
        todos.sort_by_key(|todo| todo.expiry);
        Ok(todos)
    }

    async fn find_by_id(&self, id: i64) -> DaoResult<Todo> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, todo: Todo) -> DaoResult<Todo> {
        let mut store = self.inner.write().await;
        let row = store.rows.get_mut(&todo.id).ok_or_else(|| not_found(todo.id))?;
        *row = todo.clone();
        Ok(todo)
    }

    async fn delete_by_id(&self, id: i64) -> DaoResult<()> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

/// Router with the production middleware stack over the given store, frozen
/// at [`fixed_now`].
pub fn test_router(repo: Arc<dyn TodoRepository>) -> Router {
    let config = AppConfig::default();
    let services = ServiceContext::with_repository(repo, Arc::new(FixedClock::new(fixed_now())));
    app(AppState::new(config, services))
}

pub fn test_app() -> (Router, Arc<InMemoryTodoRepository>) {
    let repo = Arc::new(InMemoryTodoRepository::default());
    (test_router(repo.clone()), repo)
}
