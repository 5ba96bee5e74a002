//! エンドポイント層
//!
//! サービスの各操作を「リクエスト封筒 → レスポンス封筒」の統一形に包む。
//! HTTP 以外のトランスポート（メッセージキュー、RPC など）からも同じ関数を呼べるよう、
//! ここではワイヤ形式を一切扱わない。業務ロジックも持たず、エラーはそのまま返す。

use async_trait::async_trait;
use domain::{Todo, TodoError, TodoId, TodoService};
use serde::{Deserialize, Serialize};
use shared::Caller;
use std::sync::Arc;
use tracing::debug;

/// 1 操作分のリクエスト封筒
#[async_trait]
pub trait Endpoint: Send {
    type Response: Send;

    /// ログ用の操作名
    const NAME: &'static str;

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError>;
}

#[derive(Debug, Clone)]
pub struct GetAllForUserRequest {
    pub caller: Caller,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAllForUserResponse {
    pub todos: Vec<Todo>,
}

#[async_trait]
impl Endpoint for GetAllForUserRequest {
    type Response = GetAllForUserResponse;
    const NAME: &'static str = "get_all_for_user";

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError> {
        let todos = service.get_all_for_user(self.caller.username()).await?;
        Ok(GetAllForUserResponse { todos })
    }
}

#[derive(Debug, Clone)]
pub struct GetByIdRequest {
    pub id: TodoId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetByIdResponse {
    pub todo: Todo,
}

#[async_trait]
impl Endpoint for GetByIdRequest {
    type Response = GetByIdResponse;
    const NAME: &'static str = "get_by_id";

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError> {
        let todo = service.get_by_id(&self.id).await?;
        Ok(GetByIdResponse { todo })
    }
}

#[derive(Debug, Clone)]
pub struct AddRequest {
    pub todo: Todo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddResponse {
    pub todo: Todo,
}

#[async_trait]
impl Endpoint for AddRequest {
    type Response = AddResponse;
    const NAME: &'static str = "add";

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError> {
        let todo = service.add(self.todo).await?;
        Ok(AddResponse { todo })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub id: TodoId,
    pub todo: Todo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {}

#[async_trait]
impl Endpoint for UpdateRequest {
    type Response = UpdateResponse;
    const NAME: &'static str = "update";

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError> {
        service.update(&self.id, self.todo).await?;
        Ok(UpdateResponse {})
    }
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub id: TodoId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {}

#[async_trait]
impl Endpoint for DeleteRequest {
    type Response = DeleteResponse;
    const NAME: &'static str = "delete";

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError> {
        service.delete(&self.id).await?;
        Ok(DeleteResponse {})
    }
}

#[derive(Debug, Clone, Default)]
pub struct HealthRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[async_trait]
impl Endpoint for HealthRequest {
    type Response = HealthResponse;
    const NAME: &'static str = "health";

    async fn serve(self, service: &dyn TodoService) -> Result<Self::Response, TodoError> {
        service.health().await?;
        Ok(HealthResponse {
            status: "ok".to_string(),
        })
    }
}

/// 全操作をまとめたタグ付きリクエスト（単一の入口でディスパッチしたいトランスポート向け）
#[derive(Debug, Clone)]
pub enum TodoRequest {
    GetAllForUser(GetAllForUserRequest),
    GetById(GetByIdRequest),
    Add(AddRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
    Health(HealthRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TodoResponse {
    GetAllForUser(GetAllForUserResponse),
    GetById(GetByIdResponse),
    Add(AddResponse),
    Update(UpdateResponse),
    Delete(DeleteResponse),
    Health(HealthResponse),
}

/// Todo サービスを構成するエンドポイント群
#[derive(Clone)]
pub struct TodoEndpoints {
    service: Arc<dyn TodoService>,
}

impl TodoEndpoints {
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self { service }
    }

    /// 1 つのエンドポイントを実行する（全操作で同じ呼び出し形）
    pub async fn call<E: Endpoint>(&self, request: E) -> Result<E::Response, TodoError> {
        debug!(endpoint = E::NAME, "エンドポイント呼び出し");
        request.serve(self.service.as_ref()).await
    }

    pub async fn dispatch(&self, request: TodoRequest) -> Result<TodoResponse, TodoError> {
        match request {
            TodoRequest::GetAllForUser(req) => self.call(req).await.map(TodoResponse::GetAllForUser),
            TodoRequest::GetById(req) => self.call(req).await.map(TodoResponse::GetById),
            TodoRequest::Add(req) => self.call(req).await.map(TodoResponse::Add),
            TodoRequest::Update(req) => self.call(req).await.map(TodoResponse::Update),
            TodoRequest::Delete(req) => self.call(req).await.map(TodoResponse::Delete),
            TodoRequest::Health(req) => self.call(req).await.map(TodoResponse::Health),
        }
    }
}
