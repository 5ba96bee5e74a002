use crate::models::TodoRecord;
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use domain::{Todo, TodoError, TodoId, TodoService};
use sqlx::{Connection, SqlitePool};
use tracing::{debug, error};
use uuid::Uuid;

const SELECT_BY_USERNAME: &str = "SELECT id, username, text, completed, created_on, completed_on, flagged \
     FROM todos WHERE username = ? ORDER BY created_on, id";
const SELECT_BY_ID: &str = "SELECT id, username, text, completed, created_on, completed_on, flagged \
     FROM todos WHERE id = ?";
const INSERT: &str = "INSERT INTO todos (id, username, text, completed, created_on, completed_on, flagged) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";
const UPDATE: &str =
    "UPDATE todos SET text = ?, completed = ?, completed_on = ?, flagged = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM todos WHERE id = ?";

/// リレーショナルストア実装
///
/// 1 操作 = 1 ステートメント。トランザクションやリトライは行わず、
/// ドライバのエラーは `TodoError::Backend` として元のエラーごと返す。
#[derive(Clone)]
pub struct SqlTodoService {
    pool: SqlitePool,
}

impl SqlTodoService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoService for SqlTodoService {
    async fn get_all_for_user(&self, username: &str) -> Result<Vec<Todo>, TodoError> {
        let records = sqlx::query_as::<_, TodoRecord>(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_all(&self.pool)
            .await
            .map_err(TodoError::backend)?;

        debug!(username, count = records.len(), "ToDo一覧取得");
        Ok(records.into_iter().map(Todo::from).collect())
    }

    async fn get_by_id(&self, id: &TodoId) -> Result<Todo, TodoError> {
        sqlx::query_as::<_, TodoRecord>(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(TodoError::backend)?
            .map(Todo::from)
            .ok_or_else(|| TodoError::NotFound(id.clone()))
    }

    async fn add(&self, mut todo: Todo) -> Result<Todo, TodoError> {
        todo.id = TodoId::from_string(Uuid::new_v4().to_string());
        // ストアの精度（マイクロ秒）に揃えて、返却値と保存値を一致させる
        todo.created_on = Utc::now().trunc_subsecs(6);

        let record = TodoRecord::from(&todo);
        let result = sqlx::query(INSERT)
            .bind(&record.id)
            .bind(&record.username)
            .bind(&record.text)
            .bind(record.completed)
            .bind(record.created_on)
            .bind(record.completed_on)
            .bind(record.flagged)
            .execute(&self.pool)
            .await
            .map_err(TodoError::backend)?;

        if result.rows_affected() != 1 {
            error!(todo_id = %todo.id, rows = result.rows_affected(), "ToDo追加: 挿入件数が不正");
            return Err(TodoError::Internal(format!(
                "expected 1 row inserted, got {}",
                result.rows_affected()
            )));
        }

        debug!(todo_id = %todo.id, "ToDo追加");
        Ok(todo)
    }

    async fn update(&self, id: &TodoId, todo: Todo) -> Result<(), TodoError> {
        todo.ensure_identity(id)?;

        let result = sqlx::query(UPDATE)
            .bind(&todo.text)
            .bind(todo.completed)
            .bind(todo.completed_on)
            .bind(todo.flagged)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(TodoError::backend)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.clone()));
        }

        debug!(todo_id = %id, "ToDo更新");
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query(DELETE)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(TodoError::backend)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.clone()));
        }

        debug!(todo_id = %id, "ToDo削除");
        Ok(())
    }

    /// 接続を 1 本取得して ping する。プールが閉じていれば即座に失敗する
    async fn health(&self) -> Result<(), TodoError> {
        let mut conn = self.pool.acquire().await.map_err(TodoError::backend)?;
        conn.ping().await.map_err(TodoError::backend)
    }
}
