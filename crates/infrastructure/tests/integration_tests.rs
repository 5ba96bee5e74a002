use domain::{Todo, TodoError, TodoService};
use infrastructure::{connect, InMemoryTodoService, SqlTodoService};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// 両バックエンドを同じシナリオで検証するためのセットアップ
async fn backends() -> Vec<(&'static str, Arc<dyn TodoService>)> {
    let pool = connect("sqlite::memory:")
        .await
        .expect("テスト用SQLiteの初期化に失敗");

    vec![
        ("memory", Arc::new(InMemoryTodoService::new()) as Arc<dyn TodoService>),
        ("sql", Arc::new(SqlTodoService::new(pool)) as Arc<dyn TodoService>),
    ]
}

/// 追加 → 一覧 → 完了更新 → 削除 の一連の流れ
#[tokio::test]
async fn test_todo_lifecycle_on_every_backend() {
    for (name, service) in backends().await {
        let added = service.add(Todo::new("a@b.com", "x")).await.unwrap();
        assert!(!added.completed, "[{name}] completed should start false");
        assert!(!added.id.is_empty(), "[{name}] id should be assigned");

        let todos = service.get_all_for_user("a@b.com").await.unwrap();
        assert_eq!(todos, vec![added.clone()], "[{name}] list after add");

        let mut completed = added.clone();
        completed.completed = true;
        service.update(&added.id, completed).await.unwrap();
        assert!(
            service.get_by_id(&added.id).await.unwrap().completed,
            "[{name}] update should be visible"
        );

        service.delete(&added.id).await.unwrap();
        assert!(
            matches!(service.get_by_id(&added.id).await, Err(TodoError::NotFound(_))),
            "[{name}] deleted todo should be NotFound"
        );
        assert!(
            service.get_all_for_user("a@b.com").await.unwrap().is_empty(),
            "[{name}] list after delete"
        );
    }
}

#[tokio::test]
async fn test_missing_ids_are_not_found_on_every_backend() {
    for (name, service) in backends().await {
        let mut ghost = Todo::new("a@b.com", "ghost");
        ghost.id = "does-not-exist".into();

        let err = service.update(&ghost.id.clone(), ghost).await.unwrap_err();
        assert!(err.is_not_found(), "[{name}] update: {err:?}");

        let err = service.delete(&"does-not-exist".into()).await.unwrap_err();
        assert!(err.is_not_found(), "[{name}] delete: {err:?}");
    }
}

#[tokio::test]
async fn test_concurrent_adds_for_same_user_on_every_backend() {
    for (name, service) in backends().await {
        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.add(Todo::new("a@b.com", "one")).await })
        };
        let second = {
            let service = service.clone();
            tokio::spawn(async move { service.add(Todo::new("a@b.com", "two")).await })
        };

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert_ne!(first.id, second.id, "[{name}] ids must differ");

        let ids: HashSet<_> = service
            .get_all_for_user("a@b.com")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, HashSet::from([first.id, second.id]), "[{name}]");
    }
}

/// 更新ペイロードの username は無視され、所有者は変わらない
#[tokio::test]
async fn test_update_keeps_owner_on_every_backend() {
    for (name, service) in backends().await {
        let added = service.add(Todo::new("a@b.com", "x")).await.unwrap();

        let mut changed = added.clone();
        changed.username = "b@b.com".to_string();
        changed.text = "y".to_string();
        service.update(&added.id, changed).await.unwrap();

        let mine = service.get_all_for_user("a@b.com").await.unwrap();
        assert_eq!(mine.len(), 1, "[{name}] owner keeps the todo");
        assert_eq!(mine[0].text, "y", "[{name}] other fields are replaced");
        assert!(
            service.get_all_for_user("b@b.com").await.unwrap().is_empty(),
            "[{name}] username in payload is ignored"
        );
    }
}

#[tokio::test]
async fn test_health_on_every_backend() {
    for (name, service) in backends().await {
        assert!(service.health().await.is_ok(), "[{name}] should be healthy");
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add { user: usize, text: String },
    Update { target: usize, completed: bool },
    Delete { target: usize },
}

const USERS: [&str; 3] = ["alice@test.com", "bob@test.com", "carol@test.com"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..USERS.len(), "[a-z]{0,8}").prop_map(|(user, text)| Op::Add { user, text }),
        (any::<usize>(), any::<bool>()).prop_map(|(target, completed)| Op::Update { target, completed }),
        any::<usize>().prop_map(|target| Op::Delete { target }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// 任意の操作列の後、一覧は「削除されていない自分の ToDo」と一致する（追加順）
    #[test]
    fn prop_get_all_for_user_matches_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let service = InMemoryTodoService::new();
            let mut model: Vec<Todo> = Vec::new();

            for op in ops {
                match op {
                    Op::Add { user, text } => {
                        let added = service.add(Todo::new(USERS[user], text)).await.unwrap();
                        model.push(added);
                    }
                    Op::Update { target, completed } if !model.is_empty() => {
                        let idx = target % model.len();
                        let mut changed = model[idx].clone();
                        changed.completed = completed;
                        service.update(&changed.id.clone(), changed.clone()).await.unwrap();
                        model[idx] = changed;
                    }
                    Op::Delete { target } if !model.is_empty() => {
                        let removed = model.remove(target % model.len());
                        service.delete(&removed.id).await.unwrap();
                    }
                    _ => {}
                }
            }

            for user in USERS {
                let expected: Vec<Todo> =
                    model.iter().filter(|t| t.username == user).cloned().collect();
                let actual = service.get_all_for_user(user).await.unwrap();
                prop_assert_eq!(actual, expected);
            }
            Ok(())
        })?;
    }
}
