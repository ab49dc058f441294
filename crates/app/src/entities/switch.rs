//! Power-only entity for climate, fan, camera, vacuum, water heater and
//! `Others` remotes.

use irhub_domain::catalog::CommandEntry;
use irhub_domain::device_type::DeviceType;
use irhub_domain::error::IrHubError;
use irhub_domain::options::RemoteOptions;

use super::EntityCore;
use crate::ports::RemoteTransport;

pub struct SwitchEntity<T> {
    core: EntityCore<T>,
    turn_on: Option<CommandEntry>,
    turn_off: Option<CommandEntry>,
}

impl<T: RemoteTransport> SwitchEntity<T> {
    /// `Others` remotes take their power commands from `options`; every
    /// other type uses the catalog.
    pub fn new(core: EntityCore<T>, options: &RemoteOptions) -> Self {
        let (turn_on, turn_off) = if core.device().device_type == DeviceType::Others {
            (
                options
                    .on_command()
                    .map(|action| CommandEntry::learned("turn_on", action)),
                options
                    .off_command()
                    .map(|action| CommandEntry::learned("turn_off", action)),
            )
        } else {
            (core.control("turn_on"), core.control("turn_off"))
        };
        Self {
            core,
            turn_on,
            turn_off,
        }
    }

    #[must_use]
    pub fn core(&self) -> &EntityCore<T> {
        &self.core
    }

    #[must_use]
    pub fn has_power_controls(&self) -> bool {
        self.turn_on.is_some() || self.turn_off.is_some()
    }

    /// # Errors
    ///
    /// [`IrHubError::UnknownCommand`] when no turn-on command is configured,
    /// [`IrHubError::CommandFailed`] or [`IrHubError::Cancelled`].
    pub async fn turn_on(&self) -> Result<(), IrHubError> {
        let _guard = self.core.begin().await?;
        let entry = self.core.require(self.turn_on.as_ref(), "turn_on")?;
        self.core.send(entry, None).await?;
        let belief = self.core.belief();
        belief.update(|state| belief.profile().turn_on(state));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn turn_off(&self) -> Result<(), IrHubError> {
        let _guard = self.core.begin().await?;
        let entry = self.core.require(self.turn_off.as_ref(), "turn_off")?;
        self.core.send(entry, None).await?;
        let belief = self.core.belief();
        belief.update(|state| belief.profile().turn_off(state));
        Ok(())
    }
}
