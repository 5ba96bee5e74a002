use crate::endpoints::TodoEndpoints;
use crate::transport::{auth, handlers};
use axum::{
    middleware,
    routing::get,
    Router,
};
use domain::TodoService;
use std::{sync::Arc, time::Duration};
use tower::Layer;
use tower_http::{
    compression::CompressionLayer, normalize_path::NormalizePath,
    normalize_path::NormalizePathLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// アプリケーションの共有状態
#[derive(Clone)]
pub struct AppState {
    pub endpoints: TodoEndpoints,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(service: Arc<dyn TodoService>, jwt_secret: &str) -> Self {
        Self {
            endpoints: TodoEndpoints::new(service),
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}

/// ルータを構築して返す
///
/// `/api/todos` 配下は JWT 必須、`/health` は認証不要。
pub fn app(state: AppState) -> Router {
    let todos = Router::new()
        .route("/", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/:id",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(CompressionLayer::new())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_caller,
        ));

    Router::new()
        .nest("/api/todos", todos)
        .route("/health", get(handlers::health))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 末尾スラッシュを取り除いてからルーティングするサービス
///
/// ルーティング前に書き換える必要があるため、`Router` の外側に被せる。
pub fn service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app(state))
}
