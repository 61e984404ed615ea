use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    clock::{Clock, SystemClock},
    db::{TodoRepository, dao::DaoContext},
    rules::TodoRules,
    services::todo_service::TodoService,
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    todos: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self::with_repository(Arc::new(DaoContext::new(db).todo()), Arc::new(SystemClock))
    }

    /// Wires an arbitrary store and clock, e.g. an in-memory repository in tests.
    pub fn with_repository(todos: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { todos, clock }
    }

    pub fn from_state(state: &AppState) -> Self {
        state.services.clone()
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(Arc::clone(&self.todos), TodoRules::new(Arc::clone(&self.clock)))
    }
}
