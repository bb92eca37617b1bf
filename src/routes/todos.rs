use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    db::entities::todo,
    error::AppError,
    models::{DateWindow, TodoPayload},
    response::{ApiResult, JsonResponse},
    services::{ServiceContext, TodoService},
    state::AppState,
};

const BASE_PATH: &str = "/todos";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub percent_complete: i32,
    pub is_done: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/today", get(list_today))
        .route("/todos/tomorrow", get(list_tomorrow))
        .route("/todos/nextweek", get(list_next_week))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    let todos = todo_service_from_state(&state).list_all().await?;
    JsonResponse::ok(into_responses(todos))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<TodoResponse> {
    let Path(id) = id?;
    let todo = todo_service_from_state(&state).get(id).await?;
    JsonResponse::ok(todo.into())
}

async fn list_today(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    list_window(&state, DateWindow::Today).await
}

async fn list_tomorrow(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    list_window(&state, DateWindow::Tomorrow).await
}

async fn list_next_week(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    list_window(&state, DateWindow::NextWeek).await
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> ApiResult<TodoResponse> {
    let Json(payload) = payload?;
    let todo = todo_service_from_state(&state).create(payload).await?;
    JsonResponse::created(format!("{BASE_PATH}/{}", todo.id), todo.into())
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let service = todo_service_from_state(&state);
    // an unknown id is reported even when the body is unreadable
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            service.get(id).await?;
            return Err(rejection.into());
        }
    };
    service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    todo_service_from_state(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_window(state: &AppState, window: DateWindow) -> ApiResult<Vec<TodoResponse>> {
    let today = Utc::now().date_naive();
    let todos = todo_service_from_state(state)
        .list_window(window, today)
        .await?;
    JsonResponse::ok(into_responses(todos))
}

fn into_responses(todos: Vec<todo::Model>) -> Vec<TodoResponse> {
    todos.into_iter().map(TodoResponse::from).collect()
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            expiry_date: model.expiry_date.and_utc(),
            percent_complete: model.percent_complete,
            is_done: model.is_done,
        }
    }
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
