//! Press-only buttons attached to every remote.

use std::sync::Arc;

use serde::Serialize;

use irhub_domain::catalog::{GENERIC_ICON, Tier};
use irhub_domain::device::RemoteDevice;
use irhub_domain::device_type::DeviceClass;
use irhub_domain::error::{IrHubError, UnknownCommandError};
use irhub_domain::options::RemoteOptions;

use crate::cancel::CancelToken;
use crate::dispatcher::CommandDispatcher;
use crate::ports::RemoteTransport;

/// One button as shown to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub command: String,
    pub unique_id: String,
    pub name: String,
    pub icon: String,
}

/// Stateless buttons of one remote. Presses never touch belief.
pub struct ButtonGroup<T> {
    device: RemoteDevice,
    dispatcher: Arc<CommandDispatcher<T>>,
    cancel: CancelToken,
    buttons: Vec<Button>,
}

impl<T: RemoteTransport> ButtonGroup<T> {
    pub fn new(
        device: RemoteDevice,
        dispatcher: Arc<CommandDispatcher<T>>,
        cancel: CancelToken,
        options: &RemoteOptions,
    ) -> Self {
        let catalog = dispatcher.catalog();
        let mut buttons: Vec<Button> = Vec::new();
        let candidates = presets(device.class(), options)
            .into_iter()
            .map(|(command, icon)| (command, Some(icon)))
            .chain(options.custom_commands().map(|command| (command, None)));

        for (command, preset_icon) in candidates {
            if buttons.iter().any(|b| b.command == command) {
                continue;
            }
            let icon = catalog
                .lookup(device.device_type, Tier::Extra, command)
                .and_then(|entry| entry.icon.clone())
                .or_else(|| preset_icon.map(str::to_string))
                .unwrap_or_else(|| GENERIC_ICON.to_string());
            buttons.push(Button {
                command: command.to_string(),
                unique_id: format!("{}_{}", device.id, decamelize(command)),
                name: display_name(&device.name, command),
                icon,
            });
        }

        Self {
            device,
            dispatcher,
            cancel,
            buttons,
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// # Errors
    ///
    /// [`IrHubError::UnknownCommand`] when `command` is not one of this
    /// group's buttons, [`IrHubError::CommandFailed`] or
    /// [`IrHubError::Cancelled`].
    pub async fn press(&self, command: &str) -> Result<(), IrHubError> {
        let button = self
            .buttons
            .iter()
            .find(|b| b.command == command)
            .ok_or_else(|| UnknownCommandError {
                device_type: self.device.device_type,
                command: command.to_string(),
            })?;
        if self.cancel.is_cancelled() {
            return Err(IrHubError::Cancelled);
        }
        tracing::debug!(remote_id = %self.device.id, command, "button pressed");
        self.dispatcher.press(&self.device, &button.command).await
    }
}

fn presets(class: DeviceClass, options: &RemoteOptions) -> Vec<(&'static str, &'static str)> {
    let mut presets = Vec::new();
    match class {
        DeviceClass::Camera => presets.extend([
            ("SHUTTER", "mdi:camera-iris"),
            ("MENU", "mdi:menu"),
            ("TIMER", "mdi:timer"),
        ]),
        DeviceClass::Fan => {
            if options.with_ion {
                presets.push(("ION", "mdi:air-filter"));
            }
            if options.with_timer {
                presets.push(("TIMER", "mdi:timer"));
            }
        }
        DeviceClass::Light => {
            if options.with_brightness {
                presets.extend([("DARKER", "mdi:brightness-4"), ("BRIGHTER", "mdi:brightness-6")]);
            }
            if options.with_temperature {
                presets.extend([("WARM", "mdi:octagram-minus"), ("WHITE", "mdi:octagram-plus")]);
            }
        }
        _ => {}
    }
    presets
}

/// `"AudioP"` → `"audio_p"`. All-caps names are kept as they are.
fn decamelize(command: &str) -> String {
    if !command.chars().any(char::is_lowercase) {
        return command.to_string();
    }
    let mut out = String::with_capacity(command.len() + 4);
    let mut prev: Option<char> = None;
    for ch in command.chars() {
        if ch.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }
    out
}

/// `"Bedroom Fan"` + `"fast_forward"` → `"Bedroom Fan Fast forward"`.
fn display_name(device_name: &str, command: &str) -> String {
    let spaced = command.replace('_', " ");
    let mut chars = spaced.chars();
    let label: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    format!("{device_name} {label}")
}
