//! Entity kinds exposed to the host.
//!
//! Every discovered remote becomes one primary entity (light, media player
//! or switch) plus a button group. Controls are resolved against the catalog
//! once, at construction.

pub mod button;
pub mod light;
pub mod media_player;
pub mod switch;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use irhub_domain::catalog::{CommandEntry, Tier};
use irhub_domain::device::RemoteDevice;
use irhub_domain::error::{IrHubError, UnknownCommandError};

use crate::belief::Belief;
use crate::cancel::CancelToken;
use crate::dispatcher::CommandDispatcher;
use crate::ports::RemoteTransport;

pub use button::{Button, ButtonGroup};
pub use light::LightEntity;
pub use media_player::MediaPlayerEntity;
pub use switch::SwitchEntity;

/// Plumbing shared by the stateful entity kinds.
///
/// Actions on one entity are single-flight: each takes the FIFO action lock
/// for its whole duration, and the cancel token is checked after taking the
/// lock and before every transport call.
pub struct EntityCore<T> {
    device: RemoteDevice,
    dispatcher: Arc<CommandDispatcher<T>>,
    belief: Arc<Belief>,
    actions: Mutex<()>,
    cancel: CancelToken,
}

impl<T: RemoteTransport> EntityCore<T> {
    pub fn new(
        device: RemoteDevice,
        dispatcher: Arc<CommandDispatcher<T>>,
        belief: Arc<Belief>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            device,
            dispatcher,
            belief,
            actions: Mutex::new(()),
            cancel,
        }
    }

    #[must_use]
    pub fn device(&self) -> &RemoteDevice {
        &self.device
    }

    #[must_use]
    pub fn belief(&self) -> &Arc<Belief> {
        &self.belief
    }

    /// Basic-tier entry for `name`, logging a warning when a control the
    /// entity wants has no catalog row.
    pub(crate) fn control(&self, name: &str) -> Option<CommandEntry> {
        let entry = self
            .dispatcher
            .catalog()
            .lookup(self.device.device_type, Tier::Basic, name)
            .cloned();
        if entry.is_none() {
            tracing::warn!(
                remote_id = %self.device.id,
                device_type = %self.device.device_type,
                command = name,
                "control not available in catalog"
            );
        }
        entry
    }

    /// Queue behind in-flight actions.
    pub(crate) async fn begin(&self) -> Result<MutexGuard<'_, ()>, IrHubError> {
        self.ensure_active()?;
        let guard = tokio::select! {
            guard = self.actions.lock() => guard,
            () = self.cancel.cancelled() => return Err(IrHubError::Cancelled),
        };
        self.ensure_active()?;
        Ok(guard)
    }

    /// Wait for the in-flight action to finish. Used after cancellation,
    /// when [`Self::begin`] would refuse.
    pub(crate) async fn settle(&self) {
        drop(self.actions.lock().await);
    }

    pub(crate) fn ensure_active(&self) -> Result<(), IrHubError> {
        if self.cancel.is_cancelled() {
            return Err(IrHubError::Cancelled);
        }
        Ok(())
    }

    /// One transport call, skipped when the entity is being torn down.
    pub(crate) async fn send(
        &self,
        entry: &CommandEntry,
        param: Option<String>,
    ) -> Result<(), IrHubError> {
        self.ensure_active()?;
        self.dispatcher.send(&self.device, entry, param).await
    }

    pub(crate) fn require<'a>(
        &self,
        entry: Option<&'a CommandEntry>,
        command: &str,
    ) -> Result<&'a CommandEntry, IrHubError> {
        entry.ok_or_else(|| self.unknown(command))
    }

    pub(crate) fn unknown(&self, command: &str) -> IrHubError {
        UnknownCommandError {
            device_type: self.device.device_type,
            command: command.to_string(),
        }
        .into()
    }
}
