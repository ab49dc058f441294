//! Command dispatcher: turns a catalog entry into a transport call.

use std::sync::Arc;

use irhub_domain::catalog::{CommandCatalog, CommandEntry, Tier};
use irhub_domain::device::RemoteDevice;
use irhub_domain::error::{CommandFailedError, IrHubError, UnknownCommandError};
use irhub_domain::event::{Event, EventType};

use crate::event_bus::InProcessEventBus;
use crate::ports::{RemoteCommand, RemoteTransport};

/// Resolves abstract commands against the catalog and sends them.
///
/// Never retries and never touches belief state: callers update belief only
/// after `Ok(())`.
pub struct CommandDispatcher<T> {
    catalog: Arc<CommandCatalog>,
    transport: T,
    events: Arc<InProcessEventBus>,
}

impl<T: RemoteTransport> CommandDispatcher<T> {
    pub fn new(catalog: Arc<CommandCatalog>, transport: T, events: Arc<InProcessEventBus>) -> Self {
        Self {
            catalog,
            transport,
            events,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    /// Send an already-resolved entry.
    ///
    /// # Errors
    ///
    /// Returns [`IrHubError::CommandFailed`] when the transport fails.
    pub async fn send(
        &self,
        device: &RemoteDevice,
        entry: &CommandEntry,
        param: Option<String>,
    ) -> Result<(), IrHubError> {
        let command = RemoteCommand {
            remote_id: device.id.clone(),
            action: entry.action.clone(),
            param,
            customizable: entry.customizable,
        };
        tracing::debug!(
            remote_id = %device.id,
            command = %entry.key,
            action = %command.action,
            customizable = command.customizable,
            "sending command"
        );
        let data = serde_json::json!({
            "command": entry.key,
            "action": entry.action,
            "param": command.param,
        });

        match self.transport.send(command).await {
            Ok(()) => {
                self.events
                    .publish(Event::new(device.id.clone(), EventType::CommandSent, data));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    remote_id = %device.id,
                    action = %entry.action,
                    error = %err,
                    "command failed"
                );
                self.events
                    .publish(Event::new(device.id.clone(), EventType::CommandFailed, data));
                Err(CommandFailedError {
                    remote_id: device.id.clone(),
                    action: entry.action.clone(),
                    source: err,
                }
                .into())
            }
        }
    }

    /// Send a basic-tier command by name.
    ///
    /// # Errors
    ///
    /// Returns [`IrHubError::UnknownCommand`] when the device type has no such
    /// basic command, or [`IrHubError::CommandFailed`] on transport failure.
    pub async fn dispatch(
        &self,
        device: &RemoteDevice,
        name: &str,
        param: Option<String>,
    ) -> Result<(), IrHubError> {
        let entry = self
            .catalog
            .lookup(device.device_type, Tier::Basic, name)
            .ok_or_else(|| UnknownCommandError {
                device_type: device.device_type,
                command: name.to_string(),
            })?;
        self.send(device, entry, param).await
    }

    /// Send an extra-tier command, falling back to a learned code named
    /// after `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IrHubError::CommandFailed`] on transport failure.
    pub async fn press(&self, device: &RemoteDevice, name: &str) -> Result<(), IrHubError> {
        let entry = self.catalog.resolve_extra(device.device_type, name);
        self.send(device, &entry, None).await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubTransport;
    use super::*;
    use irhub_domain::device_type::DeviceType;
    use irhub_domain::id::RemoteId;

    fn dispatcher() -> CommandDispatcher<StubTransport> {
        CommandDispatcher::new(
            Arc::new(CommandCatalog::builtin()),
            StubTransport::default(),
            Arc::new(InProcessEventBus::new(16)),
        )
    }

    fn device(ty: DeviceType) -> RemoteDevice {
        RemoteDevice::new(RemoteId::new("r1"), "Remote", ty).unwrap()
    }

    #[tokio::test]
    async fn should_send_canonical_action_with_param() {
        let dispatcher = dispatcher();
        dispatcher
            .dispatch(&device(DeviceType::Tv), "set_channel", Some("12".to_string()))
            .await
            .unwrap();

        let sent = dispatcher.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].action, "SetChannel");
        assert_eq!(sent[0].param.as_deref(), Some("12"));
        assert!(!sent[0].customizable);
    }

    #[tokio::test]
    async fn should_flag_learned_codes_as_customizable() {
        let dispatcher = dispatcher();
        dispatcher
            .dispatch(&device(DeviceType::Tv), "mute", None)
            .await
            .unwrap();
        let sent = dispatcher.transport.sent.lock().unwrap();
        assert_eq!(sent[0].action, "13");
        assert!(sent[0].customizable);
    }

    #[tokio::test]
    async fn should_reject_missing_basic_command_without_sending() {
        let dispatcher = dispatcher();
        let result = dispatcher
            .dispatch(&device(DeviceType::Dvd), "volume_up", None)
            .await;
        assert!(matches!(result, Err(IrHubError::UnknownCommand(_))));
        assert!(dispatcher.transport.actions().is_empty());
    }

    #[tokio::test]
    async fn should_fall_back_to_learned_code_when_pressing_unknown_extra() {
        let dispatcher = dispatcher();
        dispatcher
            .press(&device(DeviceType::Camera), "SHUTTER")
            .await
            .unwrap();
        let sent = dispatcher.transport.sent.lock().unwrap();
        assert_eq!(sent[0].action, "SHUTTER");
        assert!(sent[0].customizable);
    }

    #[tokio::test]
    async fn should_surface_transport_failure_as_command_failed() {
        let dispatcher = dispatcher();
        let mut rx = dispatcher.events.subscribe();
        dispatcher.transport.fail_on_call(&[true]);

        let result = dispatcher
            .dispatch(&device(DeviceType::Fan), "turn_on", None)
            .await;

        let Err(IrHubError::CommandFailed(err)) = result else {
            panic!("expected CommandFailed, got {result:?}");
        };
        assert_eq!(err.action, "turnOn");
        assert_eq!(rx.recv().await.unwrap().event_type, EventType::CommandFailed);
    }

    #[tokio::test]
    async fn should_publish_command_sent_event() {
        let dispatcher = dispatcher();
        let mut rx = dispatcher.events.subscribe();
        dispatcher
            .dispatch(&device(DeviceType::Light), "brightness_up", None)
            .await
            .unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::CommandSent);
        assert_eq!(event.data["action"], "brightnessUp");
    }
}
