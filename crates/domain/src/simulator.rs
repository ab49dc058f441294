//! Open-loop belief rules.
//!
//! These functions decide how belief changes after an acknowledged dispatch
//! and how a light reaches a brightness target. They never talk to a
//! transport; callers apply them only once the transport said yes.

use crate::device_type::{DeviceClass, DeviceType};
use crate::error::InvalidParameterError;
use crate::sensor::SensorReading;
use crate::state::{Brightness, EntityState, Playback, PowerState};

/// Catalog key of the step-up pulse.
pub const BRIGHTNESS_UP: &str = "brightness_up";
/// Catalog key of the step-down pulse.
pub const BRIGHTNESS_DOWN: &str = "brightness_down";

/// How one device type reacts to power changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerProfile {
    /// Power belief after a successful turn-on.
    pub on_state: PowerState,
    /// Whether turning off forgets the selected source.
    pub clears_source_on_off: bool,
}

impl PowerProfile {
    #[must_use]
    pub const fn for_device(device_type: DeviceType) -> Self {
        let on_state = match device_type.media_family() {
            Some(family) if family.idles_after_power_on() => PowerState::Idle,
            _ => PowerState::On,
        };
        Self {
            on_state,
            clears_source_on_off: matches!(device_type.class(), DeviceClass::Media),
        }
    }

    /// Belief after an acknowledged turn-on.
    pub fn turn_on(self, state: &mut EntityState) {
        state.power = self.on_state;
        state.playback = Playback::Idle;
        state.source = None;
    }

    /// Belief after an acknowledged turn-off.
    pub fn turn_off(self, state: &mut EntityState) {
        state.power = PowerState::Off;
        state.source = None;
    }

    /// Override power from a trusted sensor reading.
    ///
    /// Returns `true` when belief changed. Brightness and playback are never
    /// touched; untrusted readings are ignored.
    pub fn reconcile(self, state: &mut EntityState, reading: SensorReading) -> bool {
        if !reading.is_trusted() {
            return false;
        }
        let before = state.clone();
        if reading == SensorReading::On {
            state.power = self.on_state;
        } else {
            state.power = PowerState::Off;
            if self.clears_source_on_off {
                state.source = None;
            }
        }
        *state != before
    }
}

/// Direction of a brightness stepping loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    /// Direction needed to go from `current` to `target`, or `None` when
    /// they are already equal.
    #[must_use]
    pub fn between(current: Brightness, target: Brightness) -> Option<Self> {
        match target.cmp(&current) {
            std::cmp::Ordering::Greater => Some(Self::Up),
            std::cmp::Ordering::Less => Some(Self::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Catalog key of the pulse sent for this direction.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Up => BRIGHTNESS_UP,
            Self::Down => BRIGHTNESS_DOWN,
        }
    }

    /// Belief after one acknowledged pulse.
    #[must_use]
    pub const fn apply(self, current: Brightness) -> Brightness {
        match self {
            Self::Up => current.step_up(),
            Self::Down => current.step_down(),
        }
    }

    /// Whether the loop may stop. Overshoot counts as reached.
    #[must_use]
    pub fn reached(self, current: Brightness, target: Brightness) -> bool {
        match self {
            Self::Up => current >= target,
            Self::Down => current <= target,
        }
    }
}

/// What a light does for `turn_on(target)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPlan {
    /// One turn-on pulse; belief becomes on, brightness set to `target` when given.
    PowerOn { target: Option<Brightness> },
    /// Already on and nothing to change: resend the turn-on pulse.
    Resend,
    /// Already on: step toward `target`, no turn-on pulse.
    Step {
        direction: StepDirection,
        target: Brightness,
    },
}

impl LightPlan {
    #[must_use]
    pub fn for_turn_on(state: &EntityState, target: Option<Brightness>) -> Self {
        if !state.power.is_on() {
            return Self::PowerOn { target };
        }
        match target.and_then(|t| StepDirection::between(state.brightness, t).map(|d| (d, t))) {
            Some((direction, target)) => Self::Step { direction, target },
            None => Self::Resend,
        }
    }
}

/// Validated `play_media` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSelection {
    pub channel: String,
}

impl ChannelSelection {
    /// Only `"channel"` media with an all-digit id is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameterError`] for any other media type or a
    /// non-numeric id.
    pub fn parse(media_type: &str, media_id: &str) -> Result<Self, InvalidParameterError> {
        if media_type != "channel" {
            return Err(InvalidParameterError {
                name: "media_type",
                reason: format!("unsupported media type {media_type:?}"),
            });
        }
        if media_id.is_empty() || !media_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidParameterError {
                name: "media_id",
                reason: format!("channel must be numeric, got {media_id:?}"),
            });
        }
        Ok(Self {
            channel: media_id.to_string(),
        })
    }

    /// Source label recorded after the channel was sent.
    #[must_use]
    pub fn source_label(&self) -> String {
        format!("Channel {}", self.channel)
    }
}
