// SPDX-License-Identifier: MPL-2.0
use quick_notify::config::{self, ToastConfig, ToastOptions};
use quick_notify::domain::toast::{Position, ToastDuration};
use quick_notify::error::Error;
use quick_notify::notifications::{PromiseMessages, ToastDraft, ToastKind, ToastStore};
use std::time::Duration;
use tempfile::tempdir;

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

fn messages(store: &ToastStore) -> Vec<String> {
    store
        .toasts()
        .iter()
        .map(|t| t.message().to_string())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_capacity_evicts_oldest_first() {
    let store = ToastStore::with_options(&ToastOptions {
        max_toasts: Some(2),
        ..ToastOptions::default()
    })
    .expect("runtime");
    let toast = store.toaster();

    toast.info("A").unwrap();
    toast.info("B").unwrap();
    toast.info("C").unwrap();

    assert_eq!(messages(&store), ["B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_then_late_timers_do_nothing() {
    let store = ToastStore::with_options(&ToastOptions::default()).expect("runtime");
    let toast = store.toaster();
    for i in 0..3 {
        toast
            .success_for(format!("saved {i}"), Duration::from_millis(500))
            .unwrap();
    }
    let mut rx = store.subscribe();
    rx.borrow_and_update();

    toast.clear().unwrap();
    assert!(store.is_empty());
    assert!(rx.has_changed().unwrap());
    rx.borrow_and_update();

    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert!(!rx.has_changed().unwrap(), "no mutation after clear");
}

#[tokio::test(start_paused = true)]
async fn test_expiry_happens_once_at_duration() {
    let store = ToastStore::with_options(&ToastOptions {
        duration: Some(2000),
        ..ToastOptions::default()
    })
    .expect("runtime");
    let id = store.toaster().warning("low disk space").unwrap();

    tokio::time::advance(Duration::from_millis(1999)).await;
    settle().await;
    assert!(store.get(id).is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert!(store.get(id).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_promise_lifecycle_keeps_queue_slot() {
    let store = ToastStore::with_options(&ToastOptions::default()).expect("runtime");
    let toast = store.toaster();
    toast.info("first").unwrap();

    let (tx, rx) = tokio::sync::oneshot::channel::<Result<u8, String>>();
    let tracked = toast
        .promise(
            async move { rx.await.unwrap_or_else(|_| Err("dropped".to_string())) },
            PromiseMessages::new("Exporting...", "Exported", "Export failed"),
            Some(ToastDuration::from_millis(1000)),
        )
        .unwrap();
    toast.info("last").unwrap();

    let loading = store.toasts()[1].clone();
    assert_eq!(loading.kind(), ToastKind::Loading);

    tx.send(Err("no space".to_string())).unwrap();
    assert_eq!(tracked.await.unwrap(), Err("no space".to_string()));

    let settled = store.toasts()[1].clone();
    assert_eq!(settled.id(), loading.id());
    assert_eq!(settled.kind(), ToastKind::Error);
    assert_eq!(settled.message(), "Export failed");

    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;
    assert!(store.get(loading.id()).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_update_promise_by_operation() {
    let store = ToastStore::with_options(&ToastOptions::default()).expect("runtime");
    let op = quick_notify::domain::toast::OperationId::next();
    let id = store
        .add(
            ToastDraft::new(ToastKind::Loading, "working")
                .with_duration(ToastDuration::PINNED)
                .linked_to(op),
        )
        .unwrap();

    assert_eq!(store.update_promise(op, ToastKind::Success, "done"), Some(id));

    let toasts = store.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].id(), id);
    assert_eq!(toasts[0].kind(), ToastKind::Success);
    assert_eq!(toasts[0].message(), "done");
}

#[tokio::test(start_paused = true)]
async fn test_store_from_saved_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("toasts.toml");
    let saved = ToastOptions {
        position: Some(Position::BottomCenter),
        max_toasts: Some(1),
        reverse_order: Some(true),
        ..ToastOptions::default()
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let store = ToastStore::with_options(&loaded).expect("runtime");

    let expected = ToastConfig {
        position: Position::BottomCenter,
        reverse_order: true,
        ..ToastConfig::from_options(&ToastOptions {
            max_toasts: Some(1),
            ..ToastOptions::default()
        })
    };
    assert_eq!(store.config(), expected);

    store.toaster().info("one").unwrap();
    store.toaster().info("two").unwrap();
    assert_eq!(messages(&store), ["two"]);

    dir.close().expect("Failed to close temporary directory");
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_is_a_teardown_boundary() {
    let store = ToastStore::with_options(&ToastOptions::default()).expect("runtime");
    let toast = store.toaster();
    toast.info("bye").unwrap();

    store.shutdown();

    assert!(store.is_empty());
    assert_eq!(toast.info("too late"), Err(Error::StoreClosed));
}

#[test]
fn test_store_requires_runtime() {
    assert!(matches!(
        ToastStore::with_options(&ToastOptions::default()),
        Err(Error::NoRuntime)
    ));
}
