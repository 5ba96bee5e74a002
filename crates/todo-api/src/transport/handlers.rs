//! HTTP リクエストのデコードとレスポンスのエンコード
//!
//! 各ハンドラはリクエストを封筒に詰めてエンドポイントを 1 つ呼ぶだけ。

use crate::endpoints::{
    AddRequest, AddResponse, DeleteRequest, DeleteResponse, GetAllForUserRequest,
    GetAllForUserResponse, GetByIdRequest, GetByIdResponse, HealthRequest, HealthResponse,
    UpdateRequest, UpdateResponse,
};
use crate::transport::error::ApiError;
use crate::transport::router::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use domain::{Todo, TodoId};
use shared::Caller;

fn path_id(id: String) -> Result<TodoId, ApiError> {
    let id = TodoId::from_string(id);
    if id.is_empty() {
        return Err(ApiError::MissingParameter);
    }
    Ok(id)
}

fn decode_todo(body: Result<Json<Todo>, JsonRejection>) -> Result<Todo, ApiError> {
    body.map(|Json(todo)| todo)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<GetAllForUserResponse>, ApiError> {
    let response = state
        .endpoints
        .call(GetAllForUserRequest { caller })
        .await?;
    Ok(Json(response))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GetByIdResponse>, ApiError> {
    let id = path_id(id)?;
    let response = state.endpoints.call(GetByIdRequest { id }).await?;
    Ok(Json(response))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<Todo>, JsonRejection>,
) -> Result<Json<AddResponse>, ApiError> {
    let todo = decode_todo(body)?;
    let response = state.endpoints.call(AddRequest { todo }).await?;
    Ok(Json(response))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Todo>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let id = path_id(id)?;
    let todo = decode_todo(body)?;
    let response = state.endpoints.call(UpdateRequest { id, todo }).await?;
    Ok(Json(response))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = path_id(id)?;
    let response = state.endpoints.call(DeleteRequest { id }).await?;
    Ok(Json(response))
}

/// ヘルスチェック（認証不要）
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let response = state.endpoints.call(HealthRequest).await?;
    Ok(Json(response))
}
