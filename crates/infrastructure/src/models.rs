use chrono::{DateTime, Utc};
use domain::{Todo, TodoId};
use sqlx::FromRow;

/// `todos` テーブルの 1 行
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TodoRecord {
    pub id: String,
    pub username: String,
    pub text: String,
    pub completed: bool,
    pub created_on: DateTime<Utc>,
    pub completed_on: Option<DateTime<Utc>>,
    pub flagged: bool,
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.as_str().to_string(),
            username: todo.username.clone(),
            text: todo.text.clone(),
            completed: todo.completed,
            created_on: todo.created_on,
            completed_on: todo.completed_on,
            flagged: todo.flagged,
        }
    }
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Todo {
            id: TodoId::from_string(record.id),
            username: record.username,
            text: record.text,
            completed: record.completed,
            created_on: record.created_on,
            completed_on: record.completed_on,
            flagged: record.flagged,
        }
    }
}
