//! Development Tools
//!
//! Live reload over SSE. Changes under the content directory also reload
//! the case study store before browsers are told to refresh.

use std::{convert::Infallible, path::PathBuf, sync::mpsc as std_mpsc, time::Duration};

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Window in which follow-up events of a single save are merged.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// SSE endpoint for live reload.
pub async fn livereload_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(16);

    if let Some(reloader) = state.reloader() {
        let mut receiver = reloader.subscribe();

        tokio::spawn(async move {
            while receiver.recv().await.is_ok() {
                if tx.send(Ok(Event::default().event("reload").data("reload"))).await.is_err() {
                    break;
                }
            }
        });
    }

    Sse::new(tokio_stream::wrappers::ReceiverStream::new(rx)).keep_alive(KeepAlive::default())
}

/// Spawn a watcher thread over the content and public directories.
pub fn spawn_file_watcher(state: AppState) {
    std::thread::spawn(move || {
        let (tx, rx) = std_mpsc::channel();

        let mut watcher = match RecommendedWatcher::new(tx, Config::default()) {
            Ok(watcher) => watcher,
            Err(e) => {
                error!("Failed to create file watcher: {}", e);
                return;
            }
        };

        let content_dir = absolute(state.config().content_dir.clone());
        let public_dir = absolute(state.config().public_dir.clone());

        for dir in [&content_dir, &public_dir] {
            if !dir.exists() {
                continue;
            }
            match watcher.watch(dir, RecursiveMode::Recursive) {
                Ok(()) => info!("Watching {:?} for changes", dir),
                Err(e) => error!("Failed to watch {:?}: {}", dir, e),
            }
        }

        while let Ok(result) = rx.recv() {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    error!("Watch error: {:?}", e);
                    continue;
                }
            };
            if !(event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove()) {
                continue;
            }

            let mut paths = event.paths;
            while let Ok(Ok(more)) = rx.recv_timeout(DEBOUNCE) {
                paths.extend(more.paths);
            }
            debug!("File change detected: {:?}", paths);

            if paths.iter().any(|path| path.starts_with(&content_dir)) {
                state.reload_content();
            }
            if let Some(reloader) = state.reloader() {
                let _ = reloader.send(());
            }
        }
    });
}

fn absolute(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap_or(path)
}
