use crate::errors::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ToDo の識別子
///
/// 生成方式はバックエンドごとに異なる（インメモリは ULID、SQL は UUID v4）ため、
/// ドメイン側では不透明な文字列として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 未採番（リクエストで省略された）かどうか
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// ToDo エンティティ
///
/// 入力時は全フィールド省略可能。省略時はゼロ値（空 ID、エポック時刻、`None`、`false`）になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: TodoId,
    pub username: String,
    pub text: String,
    pub completed: bool,
    pub created_on: DateTime<Utc>,
    pub completed_on: Option<DateTime<Utc>>,
    pub flagged: bool,
}

impl Todo {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// 更新対象の ID とペイロードの ID が一致するか検証する
    pub fn ensure_identity(&self, id: &TodoId) -> Result<(), TodoError> {
        if &self.id != id {
            return Err(TodoError::InconsistentIds {
                path: id.clone(),
                payload: self.id.clone(),
            });
        }
        Ok(())
    }

    /// 更新内容を適用する
    ///
    /// 呼び出し側が変更できるフィールドは全置換。`id`・`username`・`created_on` は
    /// サーバー所有のため保存済みの値を維持する。
    pub fn apply_update(&mut self, changes: Todo) {
        self.text = changes.text;
        self.completed = changes.completed;
        self.completed_on = changes.completed_on;
        self.flagged = changes.flagged;
    }
}
