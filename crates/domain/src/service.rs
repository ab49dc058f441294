//! Service calls: what the host asks a remote to do.

use serde::{Deserialize, Serialize};

/// One host request, tagged by `service`.
///
/// ```json
/// {"service": "set_brightness", "brightness": 120}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServiceCall {
    TurnOn {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        brightness: Option<u32>,
    },
    TurnOff,
    SetBrightness {
        brightness: u32,
    },
    VolumeUp,
    VolumeDown,
    Mute,
    Play,
    Pause,
    PlayPause,
    Stop,
    NextTrack,
    PreviousTrack,
    ChannelUp,
    ChannelDown,
    PlayMedia {
        media_type: String,
        media_id: String,
    },
    Press {
        command: String,
    },
}

impl ServiceCall {
    /// Service name as it appears on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TurnOn { .. } => "turn_on",
            Self::TurnOff => "turn_off",
            Self::SetBrightness { .. } => "set_brightness",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::Mute => "mute",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::PlayPause => "play_pause",
            Self::Stop => "stop",
            Self::NextTrack => "next_track",
            Self::PreviousTrack => "previous_track",
            Self::ChannelUp => "channel_up",
            Self::ChannelDown => "channel_down",
            Self::PlayMedia { .. } => "play_media",
            Self::Press { .. } => "press",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_unit_service() {
        let call: ServiceCall = serde_json::from_str(r#"{"service":"volume_up"}"#).unwrap();
        assert_eq!(call, ServiceCall::VolumeUp);
    }

    #[test]
    fn should_parse_turn_on_without_brightness() {
        let call: ServiceCall = serde_json::from_str(r#"{"service":"turn_on"}"#).unwrap();
        assert_eq!(call, ServiceCall::TurnOn { brightness: None });
    }

    #[test]
    fn should_parse_play_media_fields() {
        let call: ServiceCall = serde_json::from_str(
            r#"{"service":"play_media","media_type":"channel","media_id":"12"}"#,
        )
        .unwrap();
        assert_eq!(call.name(), "play_media");
        assert!(matches!(call, ServiceCall::PlayMedia { media_id, .. } if media_id == "12"));
    }

    #[test]
    fn should_reject_unknown_service() {
        let result = serde_json::from_str::<ServiceCall>(r#"{"service":"explode"}"#);
        assert!(result.is_err());
    }
}
