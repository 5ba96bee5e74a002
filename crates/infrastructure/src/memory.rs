use async_trait::async_trait;
use chrono::Utc;
use domain::{Todo, TodoError, TodoId, TodoService};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use ulid::Generator;

/// プロセス内インメモリ実装（テスト・動作確認用）
///
/// 全操作が単一の `RwLock` を共有する。ID は単調増加の ULID なので、
/// `BTreeMap` の並び順がそのまま追加順になる。再起動で内容は失われる。
pub struct InMemoryTodoService {
    store: RwLock<Store>,
}

struct Store {
    todos: BTreeMap<TodoId, Todo>,
    ids: Generator,
}

impl InMemoryTodoService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                todos: BTreeMap::new(),
                ids: Generator::new(),
            }),
        }
    }
}

impl Default for InMemoryTodoService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoService for InMemoryTodoService {
    async fn get_all_for_user(&self, username: &str) -> Result<Vec<Todo>, TodoError> {
        let store = self.store.read().await;
        let todos: Vec<Todo> = store
            .todos
            .values()
            .filter(|todo| todo.username == username)
            .cloned()
            .collect();

        debug!(username, count = todos.len(), "ToDo一覧取得");
        Ok(todos)
    }

    async fn get_by_id(&self, id: &TodoId) -> Result<Todo, TodoError> {
        // 読み取りだが書き込みロックで取得する
        let store = self.store.write().await;
        store
            .todos
            .get(id)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(id.clone()))
    }

    async fn add(&self, mut todo: Todo) -> Result<Todo, TodoError> {
        let mut store = self.store.write().await;

        let ulid = store
            .ids
            .generate()
            .map_err(|e| TodoError::Internal(format!("ULID生成エラー: {e}")))?;
        todo.id = TodoId::from_string(ulid.to_string());
        todo.created_on = Utc::now();

        store.todos.insert(todo.id.clone(), todo.clone());
        debug!(todo_id = %todo.id, "ToDo追加");
        Ok(todo)
    }

    async fn update(&self, id: &TodoId, todo: Todo) -> Result<(), TodoError> {
        let mut store = self.store.write().await;

        todo.ensure_identity(id)?;
        let stored = store
            .todos
            .get_mut(id)
            .ok_or_else(|| TodoError::NotFound(id.clone()))?;
        stored.apply_update(todo);

        debug!(todo_id = %id, "ToDo更新");
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let mut store = self.store.write().await;
        if store.todos.remove(id).is_none() {
            return Err(TodoError::NotFound(id.clone()));
        }

        debug!(todo_id = %id, "ToDo削除");
        Ok(())
    }

    /// 追加・取得・削除を一巡させて業務処理が通ることを確認する
    async fn health(&self) -> Result<(), TodoError> {
        let added = self.add(Todo::default()).await?;
        let retrieved = self.get_by_id(&added.id).await?;
        if added != retrieved {
            warn!(todo_id = %added.id, "ヘルスチェック: 取得結果が追加内容と一致しません");
            return Err(TodoError::Internal(
                "health check error retrieving todo".to_string(),
            ));
        }
        self.delete(&added.id).await
    }
}
