use std::sync::Arc;

use crate::{
    db::{Todo, TodoRepository},
    error::AppError,
    rules::{Period, TodoRules},
};

/// Runs each request through the rules and then the store. Every method
/// validates fully before writing, so a rejected request changes nothing.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
    rules: TodoRules,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>, rules: TodoRules) -> Self {
        Self { repo, rules }
    }

    pub async fn create(
        &self,
        title: &str,
        description: &str,
        expiry: &str,
    ) -> Result<Todo, AppError> {
        let new_todo = self.rules.validate_create(title, description, expiry)?;
        let todo = self.repo.create(new_todo).await?;
        tracing::info!(todo_id = todo.id, "created todo");
        Ok(todo)
    }

    pub async fn get(&self, id: i64) -> Result<Todo, AppError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Lists todos for a period filter; the empty filter returns every todo.
    pub async fn list(&self, period: &str) -> Result<(Period, Vec<Todo>), AppError> {
        let (period, range) = self.rules.resolve_period(period)?;
        let todos = match range {
            None => self.repo.find_all().await?,
            Some(range) => self.repo.find_by_expiry_range(range.start, range.end).await?,
        };
        tracing::debug!(period = %period, count = todos.len(), "listed todos");
        Ok((period, todos))
    }

    pub async fn update_text(
        &self,
        id: i64,
        title: &str,
        description: &str,
        expiry: &str,
    ) -> Result<Todo, AppError> {
        let existing = self.repo.find_by_id(id).await?;
        let updated = self
            .rules
            .validate_text_update(&existing, title, description, expiry)?;
        let todo = self.repo.update(updated).await?;
        tracing::info!(todo_id = todo.id, "updated todo text");
        Ok(todo)
    }

    pub async fn update_completion(&self, id: i64, completion: f32) -> Result<Todo, AppError> {
        let existing = self.repo.find_by_id(id).await?;
        let updated = self.rules.validate_completion_update(&existing, completion)?;
        let todo = self.repo.update(updated).await?;
        tracing::info!(todo_id = todo.id, completion = todo.completion, "updated todo completion");
        Ok(todo)
    }

    pub async fn update_done(&self, id: i64, is_done: bool) -> Result<Todo, AppError> {
        let existing = self.repo.find_by_id(id).await?;
        let updated = self.rules.validate_done_update(&existing, is_done)?;
        let todo = self.repo.update(updated).await?;
        tracing::info!(todo_id = todo.id, "marked todo done");
        Ok(todo)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(todo_id = id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};

    use super::TodoService;
    use crate::{
        clock::FixedClock,
        rules::{Period, TodoRules},
        test_helpers::InMemoryTodoRepository,
    };

    fn service_with(repo: Arc<InMemoryTodoRepository>) -> TodoService {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 14, 9, 30, 0)
            .single()
            .expect("timestamp should be valid");
        TodoService::new(repo, TodoRules::new(Arc::new(FixedClock::new(now))))
    }

    fn service() -> TodoService {
        service_with(Arc::new(InMemoryTodoRepository::default()))
    }

    #[tokio::test]
    async fn create_starts_unfinished_with_zero_completion() {
        let todo = service()
            .create("Clean house", "Before the party", "2099-01-01")
            .await
            .expect("create should succeed");

        assert_eq!(todo.id, 1);
        assert_eq!(todo.completion, 0.0);
        assert!(!todo.is_done);
    }

    #[tokio::test]
    async fn rejected_create_stores_nothing() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let service = service_with(Arc::clone(&repo));

        let err = service
            .create("t", "d", "2010-05-16")
            .await
            .expect_err("past date should fail");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn text_update_on_missing_todo_is_not_found_even_with_bad_date() {
        let err = service()
            .update_text(9, "t", "d", "not-a-date")
            .await
            .expect_err("missing todo");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn completion_and_done_flow() {
        let service = service();
        let todo = service
            .create("t", "d", "2099-01-01")
            .await
            .expect("create");

        let todo = service
            .update_completion(todo.id, 50.0)
            .await
            .expect("raise completion");
        assert_eq!(todo.completion, 50.0);

        let err = service
            .update_completion(todo.id, 30.0)
            .await
            .expect_err("lowering completion");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(service.get(todo.id).await.expect("get").completion, 50.0);

        let done = service.update_done(todo.id, true).await.expect("done");
        assert!(done.is_done);
        let err = service
            .update_done(todo.id, true)
            .await
            .expect_err("already done");
        assert_eq!(err.message(), "todo is already done");
    }

    #[tokio::test]
    async fn list_filters_by_period_and_skips_done() {
        let service = service();
        let soon = service.create("soon", "d", "2026-10-15").await.expect("create");
        let later = service.create("later", "d", "2026-10-30").await.expect("create");
        service.update_done(soon.id, true).await.expect("done");
        let open = service.create("open", "d", "2026-10-15").await.expect("create");

        let (period, today) = service.list("today").await.expect("list today");
        assert_eq!(period, Period::Today);
        assert_eq!(
            today.iter().map(|todo| todo.id).collect::<Vec<_>>(),
            vec![open.id]
        );

        let (period, all) = service.list("").await.expect("list all");
        assert_eq!(period, Period::All);
        assert_eq!(
            all.iter().map(|todo| todo.id).collect::<Vec<_>>(),
            vec![soon.id, later.id, open.id]
        );

        let err = service.list("bogus").await.expect_err("bad period");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let service = service();
        let todo = service.create("t", "d", "2099-01-01").await.expect("create");

        service.delete(todo.id).await.expect("first delete");
        let err = service.delete(todo.id).await.expect_err("second delete");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
