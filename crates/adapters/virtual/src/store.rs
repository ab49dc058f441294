//! In-memory restore snapshots. Lost on restart.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use irhub_app::ports::StateStore;
use irhub_domain::error::IrHubError;
use irhub_domain::id::RemoteId;
use irhub_domain::state::LastState;

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    states: Mutex<HashMap<RemoteId, LastState>>,
}

impl InMemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn load_last_state(
        &self,
        remote_id: &RemoteId,
    ) -> impl Future<Output = Result<Option<LastState>, IrHubError>> + Send {
        let state = self
            .states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(remote_id)
            .copied();
        async move { Ok(state) }
    }

    fn save_last_state(
        &self,
        remote_id: &RemoteId,
        snapshot: LastState,
    ) -> impl Future<Output = Result<(), IrHubError>> + Send {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(remote_id.clone(), snapshot);
        async { Ok(()) }
    }
}
