use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Todo, dao::DaoResult};

/// Validated payload for a todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub expiry: DateTime<FixedOffset>,
}

/// Persistence seam for todos.
///
/// `TodoDao` is the database-backed implementation; tests swap in an
/// in-memory one.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new todo with zero completion and `is_done == false`.
    async fn create(&self, new_todo: NewTodo) -> DaoResult<Todo>;

    async fn find_all(&self) -> DaoResult<Vec<Todo>>;

    /// Unfinished todos whose expiry lies within `[start, end]`, bounds inclusive.
    async fn find_by_expiry_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> DaoResult<Vec<Todo>>;

    async fn find_by_id(&self, id: i64) -> DaoResult<Todo>;

    /// Rewrites every mutable column of an existing row.
    async fn update(&self, todo: Todo) -> DaoResult<Todo>;

    async fn delete_by_id(&self, id: i64) -> DaoResult<()>;
}
