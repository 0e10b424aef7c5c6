use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::domain::repository::TodoRepository;
use crate::domain::todo::Todo;
use crate::http::types::ApiError;

/// Shared handler state. Holding the repository behind the contract lets
/// any conforming implementation stand in, including the test double.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn TodoRepository>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/todos", post(create_todo))
        .route("/todos/:id", get(get_todo))
        .with_state(state)
}

#[tracing::instrument(skip_all)]
async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(mut todo) = payload.map_err(|_| ApiError::bad_request("invalid todo format"))?;
    state.repo.create(&mut todo).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[tracing::instrument(skip_all)]
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.repo.get(id).await?;
    Ok(Json(todo))
}

fn parse_id(s: &str) -> Result<i64, ApiError> {
    match s.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request("invalid todo id")),
    }
}
