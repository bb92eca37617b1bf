use chrono::NaiveDate;
use tracing::debug;

use crate::{
    db::dao::TodoDao,
    db::entities::todo,
    error::AppError,
    models::{DateWindow, TodoPayload},
};

/// The todo store: every read and write goes through here so that
/// validation and not-found handling are the same for all callers.
#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn list_all(&self) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.list_all().await?)
    }

    pub async fn get(&self, id: i32) -> Result<todo::Model, AppError> {
        Ok(self.todo_dao.find_todo(id).await?)
    }

    pub async fn list_by_expiry_date(&self, date: NaiveDate) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.list_by_expiry_date(date).await?)
    }

    pub async fn list_by_expiry_range(
        &self,
        after: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.list_by_expiry_range(after, until).await?)
    }

    pub async fn list_window(
        &self,
        window: DateWindow,
        today: NaiveDate,
    ) -> Result<Vec<todo::Model>, AppError> {
        let filter = window.filter(today);
        let todos = self.todo_dao.list_by_filter(filter).await?;
        debug!(window = window.as_str(), %today, count = todos.len(), "listed todos by window");
        Ok(todos)
    }

    pub async fn create(&self, payload: TodoPayload) -> Result<todo::Model, AppError> {
        let draft = payload.into_draft().map_err(AppError::validation)?;
        let created = self.todo_dao.create_todo(draft).await?;
        debug!(id = created.id, "created todo");
        Ok(created)
    }

    /// Replaces every field but the id. A missing id wins over an invalid payload.
    pub async fn update(&self, id: i32, payload: TodoPayload) -> Result<todo::Model, AppError> {
        let updated = self
            .todo_dao
            .replace_todo(id, move || payload.into_draft().map_err(AppError::validation))
            .await?;
        debug!(id, "updated todo");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.todo_dao.delete_todo(id).await?;
        debug!(id, "deleted todo");
        Ok(())
    }
}
