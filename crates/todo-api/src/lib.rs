//! Todo サービスのエンドポイント層と HTTP トランスポート

pub mod endpoints;
pub mod transport;

pub use endpoints::*;
pub use transport::{app, service, ApiError, AppState};
