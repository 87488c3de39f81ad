//! Ringside Sync - Dual-store reconciliation and mutation commands.
//!
//! Keeps the in-memory working set consistent with the remote canonical
//! store and the local fallback cache using optimistic writes and full
//! reloads.

pub mod coordinator;
pub mod http;
pub mod remote;

pub use coordinator::SyncCoordinator;
pub use http::HttpRemoteStore;
pub use remote::{FightPatch, RemoteError, RemoteStore};

#[cfg(any(test, feature = "test-utils"))]
pub use remote::mock::MockRemoteStore;
