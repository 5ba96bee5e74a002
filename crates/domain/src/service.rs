use crate::{Todo, TodoError, TodoId};
use async_trait::async_trait;

/// ToDo サービスの能力インターフェース
///
/// インメモリ実装と SQL 実装が同じ契約を満たす。バックエンドの選択は
/// 起動時に一度だけ行い、以降は `Arc<dyn TodoService>` として扱う。
///
/// 返却される `Future` を drop すると処理中の I/O も中断される。
#[async_trait]
pub trait TodoService: Send + Sync {
    /// 指定ユーザーが所有する ToDo を全件返す。該当なしは空の Vec（エラーにはしない）
    async fn get_all_for_user(&self, username: &str) -> Result<Vec<Todo>, TodoError>;

    /// 存在しない場合は `TodoError::NotFound`
    async fn get_by_id(&self, id: &TodoId) -> Result<Todo, TodoError>;

    /// `id` と `created_on` はサーバー側で採番・設定する（呼び出し側の値は無視）
    async fn add(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// `todo.id != id` の場合は `InconsistentIds`、対象が無ければ `NotFound`
    ///
    /// 置き換わるのは `text`・`completed`・`completed_on`・`flagged` のみ。
    /// `username` と `created_on` は保存済みの値が残り、ペイロード側の値はエラーにせず無視する。
    async fn update(&self, id: &TodoId, todo: Todo) -> Result<(), TodoError>;

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;

    async fn health(&self) -> Result<(), TodoError>;
}
