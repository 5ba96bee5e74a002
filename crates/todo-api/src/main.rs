//! todo-api バイナリのエントリポイント

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use domain::TodoService;
use infrastructure::{InMemoryTodoService, SqlTodoService};
use shared::{init_tracing, BackendKind, Config};
use std::{net::SocketAddr, sync::Arc};
use todo_api::{service, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("設定の読み込みに失敗")?;
    init_tracing(config.debug).map_err(|e| anyhow::anyhow!("トレーシング初期化エラー: {e}"))?;

    let todos: Arc<dyn TodoService> = match config.backend {
        BackendKind::Sql => {
            let pool = infrastructure::connect(&config.database_url).await?;
            info!(backend = "sql", "SQL バックエンドを使用");
            Arc::new(SqlTodoService::new(pool))
        }
        BackendKind::Memory => {
            info!(backend = "memory", "インメモリバックエンドを使用");
            Arc::new(InMemoryTodoService::new())
        }
    };

    let state = AppState::new(todos, &config.jwt_secret);
    let app = service(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;
    info!(%addr, environment = %config.environment, "server starting");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "シグナルハンドラの登録に失敗");
    }
}
