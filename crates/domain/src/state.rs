//! Belief state: what irhub thinks an appliance is currently doing.
//!
//! Nothing here is observed. Every field reflects the last acknowledged
//! dispatch, or a power correction from a trusted sensor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Power belief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    On,
    Off,
    /// Powered but not doing anything yet (disc players and speakers).
    Idle,
}

impl PowerState {
    #[must_use]
    pub const fn is_on(self) -> bool {
        !matches!(self, Self::Off)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playback belief for media entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Light brightness, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(255);
    /// Change produced by one brightness pulse.
    pub const STEP: u8 = 25;

    /// Clamp any requested level into range.
    #[must_use]
    pub fn clamped(value: u32) -> Self {
        let value = value.clamp(u32::from(Self::MIN.0), u32::from(Self::MAX.0));
        Self(u8::try_from(value).unwrap_or(Self::MAX.0))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Belief after one step-up pulse.
    #[must_use]
    pub const fn step_up(self) -> Self {
        Self(self.0.saturating_add(Self::STEP))
    }

    /// Belief after one step-down pulse.
    #[must_use]
    pub const fn step_down(self) -> Self {
        let lowered = self.0.saturating_sub(Self::STEP);
        if lowered < Self::MIN.0 {
            Self::MIN
        } else {
            Self(lowered)
        }
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Self::clamped(u32::from(value))
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State string shown to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Off,
    On,
    Idle,
    Playing,
    Paused,
}

impl DisplayState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full belief for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityState {
    pub power: PowerState,
    pub brightness: Brightness,
    pub playback: Playback,
    pub source: Option<String>,
}

impl Default for EntityState {
    fn default() -> Self {
        Self {
            power: PowerState::Off,
            brightness: Brightness::default(),
            playback: Playback::Idle,
            source: None,
        }
    }
}

impl EntityState {
    /// Seed belief from a restore snapshot, if any.
    #[must_use]
    pub fn restored(last: Option<&LastState>) -> Self {
        let mut state = Self::default();
        if let Some(last) = last {
            state.power = last.power;
            if let Some(brightness) = last.brightness {
                state.brightness = brightness;
            }
        }
        state
    }

    #[must_use]
    pub fn display(&self) -> DisplayState {
        match (self.power, self.playback) {
            (PowerState::Off, _) => DisplayState::Off,
            (_, Playback::Playing) => DisplayState::Playing,
            (_, Playback::Paused) => DisplayState::Paused,
            (PowerState::On, Playback::Idle) => DisplayState::On,
            (PowerState::Idle, Playback::Idle) => DisplayState::Idle,
        }
    }

    /// Snapshot persisted at teardown.
    #[must_use]
    pub fn last_state(&self, with_brightness: bool) -> LastState {
        LastState {
            power: self.power,
            brightness: with_brightness.then_some(self.brightness),
        }
    }
}

/// Restore snapshot persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastState {
    pub power: PowerState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
}
