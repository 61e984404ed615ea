use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{DaoLayerError, DaoResult};
use crate::db::entities::{prelude::Todo as TodoEntity, todo};
use crate::db::{NewTodo, Todo, TodoRepository};

const ENTITY: &str = "Todo";

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn not_found(id: i64) -> DaoLayerError {
        DaoLayerError::NotFound { entity: ENTITY, id }
    }
}

#[async_trait]
impl TodoRepository for TodoDao {
    async fn create(&self, new_todo: NewTodo) -> DaoResult<Todo> {
        let model = todo::ActiveModel {
            title: Set(new_todo.title),
            description: Set(new_todo.description),
            completion: Set(0.0),
            expiry: Set(new_todo.expiry),
            is_done: Set(false),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(DaoLayerError::Db)
    }

    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        TodoEntity::find()
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn find_by_expiry_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> DaoResult<Vec<Todo>> {
        TodoEntity::find()
            .filter(todo::Column::Expiry.between(start, end))
            .filter(todo::Column::IsDone.eq(false))
            .order_by_asc(todo::Column::Expiry)
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: i64) -> DaoResult<Todo> {
        TodoEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn update(&self, todo: Todo) -> DaoResult<Todo> {
        let id = todo.id;
        let active = todo::ActiveModel {
            id: Unchanged(todo.id),
            title: Set(todo.title),
            description: Set(todo.description),
            completion: Set(todo.completion),
            expiry: Set(todo.expiry),
            is_done: Set(todo.is_done),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotUpdated) => Err(Self::not_found(id)),
            Err(err) => Err(DaoLayerError::Db(err)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> DaoResult<()> {
        let result = TodoEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
