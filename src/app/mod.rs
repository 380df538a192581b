// SPDX-License-Identifier: MPL-2.0
//! Terminal showcase for the toast engine.
//!
//! Drives a [`ToastStore`] through a scripted tour (every kind, custom
//! durations, promise tracking, eviction, actions, clearing) while a
//! watcher task prints each new snapshot.

pub mod render;

use crate::config::{self, ToastOptions, DEMO_SETTLED_DURATION_MS};
use crate::domain::toast::{Position, ToastDuration};
use crate::error::Result;
use crate::notifications::{PromiseMessages, ToastDraft, ToastKind, ToastStore, Toaster};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Command-line flags for the demo.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Explicit configuration file; defaults to the user config directory.
    pub config_path: Option<PathBuf>,
    pub position: Option<Position>,
    /// Default duration override in milliseconds.
    pub duration: Option<u64>,
    pub max_toasts: Option<usize>,
    /// Show newest toasts first.
    pub newest_first: bool,
}

impl Flags {
    /// Loads the configuration file and applies the command-line overrides.
    pub fn options(&self) -> Result<ToastOptions> {
        let from_file = match &self.config_path {
            Some(path) => config::load_from_path(path)?,
            None => config::load()?,
        };
        let overrides = ToastOptions {
            position: self.position,
            duration: self.duration,
            max_toasts: self.max_toasts,
            reverse_order: self.newest_first.then_some(true),
        };
        Ok(from_file.merge(overrides))
    }
}

/// Runs the showcase until every step has played out.
pub async fn run(flags: Flags) -> Result<()> {
    let options = flags.options()?;
    let store = ToastStore::with_options(&options)?;

    let mut snapshots = store.subscribe();
    let watcher = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let text = render::render(&snapshots.borrow_and_update());
            println!("{text}\n");
        }
    });

    let result = tour(&store.toaster()).await;

    store.shutdown();
    drop(store);
    join_watcher(watcher).await;
    result
}

/// Waits for the snapshot printer to drain. Returns false if it failed.
async fn join_watcher(watcher: JoinHandle<()>) -> bool {
    match watcher.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Snapshot printer task failed");
            false
        }
    }
}

async fn pause(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

async fn tour(toast: &Toaster) -> Result<()> {
    toast.success("Hello World!")?;
    pause(400).await;
    toast.error("Error occurred!")?;
    toast.warning_for("This toast will disappear in 2s", Duration::from_secs(2))?;
    toast.info("Information")?;
    pause(600).await;

    let sticky = toast.error_for("Critical error", ToastDuration::PINNED)?;
    let undo = toast.show(
        ToastDraft::new(ToastKind::Info, "Message archived")
            .with_title("Inbox")
            .with_action("Undo", || tracing::info!("Undo requested")),
    )?;
    pause(400).await;
    toast.store().trigger(undo);

    let upload = toast.promise(
        async {
            pause(1200).await;
            Ok::<_, String>("report.pdf")
        },
        PromiseMessages::new("Uploading report...", "Report uploaded", "Upload failed"),
        Some(ToastDuration::from_millis(DEMO_SETTLED_DURATION_MS)),
    )?;
    let sync = toast.promise(
        async {
            pause(800).await;
            Err::<(), _>("connection reset".to_string())
        },
        PromiseMessages::new("Syncing...", "Synced", "Sync failed"),
        Some(ToastDuration::from_millis(DEMO_SETTLED_DURATION_MS)),
    )?;

    if let Ok(Err(reason)) = sync.await {
        tracing::info!(%reason, "Sync operation failed");
    }
    if let Ok(Ok(file)) = upload.await {
        tracing::info!(file, "Upload operation finished");
    }
    pause(500).await;

    for i in 1..=6 {
        toast.info_for(format!("Burst #{i}"), Duration::from_millis(1500))?;
    }
    pause(1600).await;

    toast.dismiss(sticky)?;
    toast.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn failed_watcher_is_reported() {
        let ok = tokio::spawn(async {});
        assert!(join_watcher(ok).await);

        let panicked = tokio::spawn(async { panic!("printer crashed") });
        assert!(!join_watcher(panicked).await);
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("toasts.toml");
        config::save_to_path(
            &ToastOptions {
                duration: Some(1000),
                max_toasts: Some(4),
                ..ToastOptions::default()
            },
            &path,
        )
        .expect("failed to save config");

        let flags = Flags {
            config_path: Some(path),
            max_toasts: Some(2),
            newest_first: true,
            ..Flags::default()
        };
        let options = flags.options().expect("options");

        assert_eq!(options.duration, Some(1000));
        assert_eq!(options.max_toasts, Some(2));
        assert_eq!(options.reverse_order, Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn tour_completes_and_leaves_store_empty() {
        let store = ToastStore::with_options(&ToastOptions::default()).unwrap();
        tour(&store.toaster()).await.expect("tour");
        assert!(store.is_empty());
    }
}
