//! Light entity: power plus brightness stepping.

use irhub_domain::catalog::CommandEntry;
use irhub_domain::error::IrHubError;
use irhub_domain::simulator::{BRIGHTNESS_DOWN, BRIGHTNESS_UP, LightPlan, StepDirection};
use irhub_domain::state::Brightness;

use super::EntityCore;
use crate::ports::RemoteTransport;

/// An IR light with simulated brightness.
///
/// The appliance only understands "a bit brighter" and "a bit darker", so a
/// brightness target is reached by sending pulses until belief crosses it.
pub struct LightEntity<T> {
    core: EntityCore<T>,
    turn_on: Option<CommandEntry>,
    turn_off: Option<CommandEntry>,
    step_up: Option<CommandEntry>,
    step_down: Option<CommandEntry>,
}

impl<T: RemoteTransport> LightEntity<T> {
    pub fn new(core: EntityCore<T>) -> Self {
        Self {
            turn_on: core.control("turn_on"),
            turn_off: core.control("turn_off"),
            step_up: core.control(BRIGHTNESS_UP),
            step_down: core.control(BRIGHTNESS_DOWN),
            core,
        }
    }

    #[must_use]
    pub fn core(&self) -> &EntityCore<T> {
        &self.core
    }

    /// Turn on, optionally heading for a brightness target.
    ///
    /// # Errors
    ///
    /// [`IrHubError::CommandFailed`] when a pulse is rejected (belief keeps
    /// every pulse acknowledged before it), [`IrHubError::Cancelled`] on
    /// teardown, [`IrHubError::UnknownCommand`] when the catalog lacks a
    /// needed control.
    pub async fn turn_on(&self, target: Option<Brightness>) -> Result<(), IrHubError> {
        let _guard = self.core.begin().await?;
        let belief = self.core.belief();
        let plan = LightPlan::for_turn_on(&belief.snapshot(), target);
        tracing::debug!(remote_id = %self.core.device().id, ?plan, "light turn on");

        match plan {
            LightPlan::PowerOn { target } => {
                let entry = self.core.require(self.turn_on.as_ref(), "turn_on")?;
                self.core.send(entry, None).await?;
                belief.update(|state| {
                    belief.profile().turn_on(state);
                    if let Some(target) = target {
                        state.brightness = target;
                    }
                });
            }
            LightPlan::Resend => {
                let entry = self.core.require(self.turn_on.as_ref(), "turn_on")?;
                self.core.send(entry, None).await?;
                belief.update(|state| belief.profile().turn_on(state));
            }
            LightPlan::Step { direction, target } => self.step(direction, target).await?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`turn_on`](Self::turn_on).
    pub async fn set_brightness(&self, target: Brightness) -> Result<(), IrHubError> {
        self.turn_on(Some(target)).await
    }

    /// # Errors
    ///
    /// [`IrHubError::CommandFailed`] or [`IrHubError::Cancelled`].
    pub async fn turn_off(&self) -> Result<(), IrHubError> {
        let _guard = self.core.begin().await?;
        let entry = self.core.require(self.turn_off.as_ref(), "turn_off")?;
        self.core.send(entry, None).await?;
        let belief = self.core.belief();
        belief.update(|state| belief.profile().turn_off(state));
        Ok(())
    }

    // Caller holds the action lock.
    async fn step(&self, direction: StepDirection, target: Brightness) -> Result<(), IrHubError> {
        let entry = match direction {
            StepDirection::Up => self.step_up.as_ref(),
            StepDirection::Down => self.step_down.as_ref(),
        };
        let entry = self.core.require(entry, direction.command())?;
        let belief = self.core.belief();

        while !direction.reached(belief.snapshot().brightness, target) {
            self.core.send(entry, None).await?;
            belief.update(|state| state.brightness = direction.apply(state.brightness));
        }
        Ok(())
    }
}
