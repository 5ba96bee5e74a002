use crate::todo::TodoId;
use thiserror::Error;

/// ストレージ由来のエラー（元のエラーを source として保持する）
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Not found")]
    NotFound(TodoId),

    #[error("Inconsistent IDs")]
    InconsistentIds { path: TodoId, payload: TodoId },

    // 接続断などストアそのものの失敗。NotFound とは必ず区別する
    #[error("Backend error: {0}")]
    Backend(#[source] BoxError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
