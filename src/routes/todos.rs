use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    db::Todo,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    rules::Period,
    services::{ServiceContext, TodoService},
    state::AppState,
};

const MAX_COMPLETION: f32 = 100.0;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub expiry: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub expiry: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompletionRequest {
    pub id: i64,
    pub completion: f32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDoneRequest {
    pub id: i64,
    pub is_done: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    #[serde(default)]
    pub period: String,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completion: f32,
    pub expiry: DateTime<FixedOffset>,
    pub is_done: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/todos",
            get(list_todos).post(create_todo).patch(update_todo),
        )
        .route("/todos/completion", patch(update_completion))
        .route("/todos/done", patch(update_done))
        .route("/todos/{id}", get(get_todo).delete(delete_todo))
        .with_state(state)
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let title = normalize_title(&body.title)?;
    let description = normalize_description(&body.description)?;
    let service = todo_service_from_state(state.as_ref());
    let todo = service.create(title, description, &body.expiry).await?;
    JsonApiResponse::ok("Created todo", todo.into())
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<TodoResponse> {
    let id = require_id(id)?;
    let service = todo_service_from_state(state.as_ref());
    let todo = service.get(id).await?;
    JsonApiResponse::ok("Received todo", todo.into())
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTodosQuery>,
) -> ApiResult<Vec<TodoResponse>> {
    let service = todo_service_from_state(state.as_ref());
    let (period, todos) = service.list(&query.period).await?;
    JsonApiResponse::ok(
        list_message(period),
        todos.into_iter().map(TodoResponse::from).collect(),
    )
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let id = require_id(body.id)?;
    let title = normalize_title(&body.title)?;
    let description = normalize_description(&body.description)?;
    let service = todo_service_from_state(state.as_ref());
    let todo = service
        .update_text(id, title, description, &body.expiry)
        .await?;
    JsonApiResponse::ok("Updated todo's description", todo.into())
}

async fn update_completion(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateCompletionRequest>,
) -> ApiResult<TodoResponse> {
    let id = require_id(body.id)?;
    if !(0.0..=MAX_COMPLETION).contains(&body.completion) {
        return Err(AppError::bad_request(format!(
            "completion must be between 0 and {MAX_COMPLETION}"
        )));
    }
    let service = todo_service_from_state(state.as_ref());
    let todo = service.update_completion(id, body.completion).await?;
    JsonApiResponse::ok("Updated todo's completion progress", todo.into())
}

async fn update_done(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateDoneRequest>,
) -> ApiResult<TodoResponse> {
    let id = require_id(body.id)?;
    if !body.is_done {
        return Err(AppError::bad_request("is_done must be true"));
    }
    let service = todo_service_from_state(state.as_ref());
    let todo = service.update_done(id, body.is_done).await?;
    JsonApiResponse::ok("Updated todo's status", todo.into())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let id = require_id(id)?;
    let service = todo_service_from_state(state.as_ref());
    service.delete(id).await?;
    JsonApiResponse::message("Deleted todo")
}

fn list_message(period: Period) -> &'static str {
    match period {
        Period::All => "Got all todos",
        Period::Today => "Got all todos for today",
        Period::Tomorrow => "Got all todos for tomorrow",
        Period::Week => "Got all todos for this week",
    }
}

fn require_id(id: i64) -> Result<i64, AppError> {
    if id < 1 {
        return Err(AppError::bad_request("id must be a positive integer"));
    }
    Ok(id)
}

fn normalize_title(title: &str) -> Result<&str, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Title required"));
    }
    Ok(trimmed)
}

fn normalize_description(description: &str) -> Result<&str, AppError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Description required"));
    }
    Ok(trimmed)
}

impl From<Todo> for TodoResponse {
    fn from(model: Todo) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completion: model.completion,
            expiry: model.expiry,
            is_done: model.is_done,
        }
    }
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
