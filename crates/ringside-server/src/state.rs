use std::sync::Arc;

use tokio::sync::Mutex;

use ringside_core::SnapshotCache;
use ringside_sync::{RemoteStore, SyncCoordinator};

/// Application state shared across handlers.
///
/// The coordinator sits behind an async mutex so commands run as a single
/// cooperative sequence, each awaiting its remote writes and reload before
/// the next command starts.
pub struct AppState<R: RemoteStore, C: SnapshotCache> {
    pub coordinator: Arc<Mutex<SyncCoordinator<R, C>>>,
}

impl<R: RemoteStore, C: SnapshotCache> AppState<R, C> {
    pub fn new(coordinator: SyncCoordinator<R, C>) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
        }
    }
}

impl<R: RemoteStore, C: SnapshotCache> Clone for AppState<R, C> {
    fn clone(&self) -> Self {
        Self {
            coordinator: self.coordinator.clone(),
        }
    }
}
