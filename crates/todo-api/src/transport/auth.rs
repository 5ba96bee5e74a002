use crate::transport::error::ApiError;
use crate::transport::router::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// JWT を検証し、呼び出し元 (`shared::Caller`) をリクエスト拡張に格納するミドルウェア
///
/// 検証に失敗した場合、後続のハンドラは呼ばれない。
pub async fn require_caller(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let caller = shared::authenticate(header, &state.jwt_secret).map_err(|e| {
        warn!(error = %e, "認証失敗");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
