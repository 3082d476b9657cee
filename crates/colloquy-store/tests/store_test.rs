use colloquy_store::{MemoryThreadStore, ThreadRecord, ThreadStore};
use serde_json::json;

#[tokio::test]
async fn test_put_then_get_round_trips() {
    let store = MemoryThreadStore::new();
    let record = ThreadRecord::new(
        "thread_abc123",
        json!({
            "title": "support chat",
            "tags": ["billing", "urgent"],
            "nested": {"depth": 2, "flag": true}
        }),
    );

    store.put(record.clone()).await.unwrap();
    let fetched = store.get("thread_abc123").await.unwrap();

    assert_eq!(fetched, Some(record));
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let store = MemoryThreadStore::new();

    let fetched = store.get("thread_unknown").await.unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn test_put_replaces_whole_record() {
    let store = MemoryThreadStore::new();

    store
        .put(ThreadRecord::new("thread_abc123", json!({"v": 1})))
        .await
        .unwrap();
    store
        .put(ThreadRecord::new("thread_abc123", json!({"v": 2})))
        .await
        .unwrap();

    let fetched = store.get("thread_abc123").await.unwrap().unwrap();
    assert_eq!(fetched.metadata, json!({"v": 2}));
}

#[tokio::test]
async fn test_records_are_isolated_by_thread_id() {
    let store = MemoryThreadStore::new();

    store
        .put(ThreadRecord::new("thread_a", json!({"owner": "a"})))
        .await
        .unwrap();
    store
        .put(ThreadRecord::new("thread_b", json!({"owner": "b"})))
        .await
        .unwrap();

    let a = store.get("thread_a").await.unwrap().unwrap();
    let b = store.get("thread_b").await.unwrap().unwrap();

    assert_eq!(a.metadata["owner"], "a");
    assert_eq!(b.metadata["owner"], "b");
}
