//! State store port: restore snapshots kept between runs.

use std::future::Future;
use std::sync::Arc;

use irhub_domain::error::IrHubError;
use irhub_domain::id::RemoteId;
use irhub_domain::state::LastState;

/// Persists the last known belief of each remote.
pub trait StateStore: Send + Sync {
    /// Snapshot saved by the previous run, if any.
    fn load_last_state(
        &self,
        remote_id: &RemoteId,
    ) -> impl Future<Output = Result<Option<LastState>, IrHubError>> + Send;

    /// Replace the snapshot for `remote_id`.
    fn save_last_state(
        &self,
        remote_id: &RemoteId,
        snapshot: LastState,
    ) -> impl Future<Output = Result<(), IrHubError>> + Send;
}

impl<S: StateStore> StateStore for Arc<S> {
    fn load_last_state(
        &self,
        remote_id: &RemoteId,
    ) -> impl Future<Output = Result<Option<LastState>, IrHubError>> + Send {
        (**self).load_last_state(remote_id)
    }

    fn save_last_state(
        &self,
        remote_id: &RemoteId,
        snapshot: LastState,
    ) -> impl Future<Output = Result<(), IrHubError>> + Send {
        (**self).save_last_state(remote_id, snapshot)
    }
}
