//! Built-in command tables.
//!
//! Learned numeric codes are the button indices of the vendor's stock
//! remotes; they only mean something to the remote that learned them.

use super::{CommandCatalog, CommandEntry, Tier};
use crate::device_type::DeviceType;

/// `(key, action, customizable, icon)`
type Row = (&'static str, &'static str, bool, Option<&'static str>);

const POWER: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
];

const LIGHT_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("brightness_up", "brightnessUp", false, None),
    ("brightness_down", "brightnessDown", false, None),
];

const TV_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("volume_up", "volumeAdd", false, None),
    ("volume_down", "volumeSub", false, None),
    ("channel_up", "channelAdd", false, None),
    ("channel_down", "channelSub", false, None),
    ("set_channel", "SetChannel", false, None),
    ("mute", "13", true, Some("mdi:volume-mute")),
];

const TV_EXTRA: &[Row] = &[
    ("menu", "5", true, Some("mdi:menu")),
    ("back", "39", true, Some("mdi:arrow-left")),
    ("select", "41", true, Some("mdi:check")),
    ("cursor_up", "43", true, Some("mdi:arrow-up")),
    ("cursor_down", "49", true, Some("mdi:arrow-down")),
    ("cursor_left", "45", true, Some("mdi:arrow-left")),
    ("cursor_right", "47", true, Some("mdi:arrow-right")),
    ("digit_1", "15", true, Some("mdi:numeric-1-box")),
    ("digit_2", "17", true, Some("mdi:numeric-2-box")),
    ("digit_3", "19", true, Some("mdi:numeric-3-box")),
    ("digit_4", "21", true, Some("mdi:numeric-4-box")),
    ("digit_5", "23", true, Some("mdi:numeric-5-box")),
    ("digit_6", "25", true, Some("mdi:numeric-6-box")),
    ("digit_7", "27", true, Some("mdi:numeric-7-box")),
    ("digit_8", "29", true, Some("mdi:numeric-8-box")),
    ("digit_9", "31", true, Some("mdi:numeric-9-box")),
    ("digit_0", "35", true, Some("mdi:numeric-0-box")),
    ("source_av_tv", "37", true, Some("mdi:television-classic")),
    ("reset", "33", true, Some("mdi:restart")),
];

const IPTV_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("volume_up", "volumeAdd", false, None),
    ("volume_down", "volumeSub", false, None),
    ("channel_up", "channelAdd", false, None),
    ("channel_down", "channelSub", false, None),
    ("set_channel", "SetChannel", false, None),
    ("play", "23", true, None),
    ("mute", "3", true, Some("mdi:volume-mute")),
];

const IPTV_EXTRA: &[Row] = &[
    ("cursor_up", "13", true, Some("mdi:arrow-up")),
    ("cursor_left", "15", true, Some("mdi:arrow-left")),
    ("select", "17", true, Some("mdi:check")),
    ("cursor_right", "19", true, Some("mdi:arrow-right")),
    ("cursor_down", "21", true, Some("mdi:arrow-down")),
    ("back", "45", true, Some("mdi:arrow-left")),
    ("digit_1", "25", true, Some("mdi:numeric-1-box")),
    ("digit_2", "27", true, Some("mdi:numeric-2-box")),
    ("digit_3", "29", true, Some("mdi:numeric-3-box")),
    ("digit_4", "31", true, Some("mdi:numeric-4-box")),
    ("digit_5", "33", true, Some("mdi:numeric-5-box")),
    ("digit_6", "35", true, Some("mdi:numeric-6-box")),
    ("digit_7", "37", true, Some("mdi:numeric-7-box")),
    ("digit_8", "39", true, Some("mdi:numeric-8-box")),
    ("digit_9", "41", true, Some("mdi:numeric-9-box")),
    ("digit_0", "43", true, Some("mdi:numeric-0-box")),
];

const SET_TOP_BOX_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("volume_up", "volumeAdd", false, None),
    ("volume_down", "volumeSub", false, None),
    ("channel_up", "channelAdd", false, None),
    ("channel_down", "channelSub", false, None),
    ("set_channel", "SetChannel", false, None),
];

const SET_TOP_BOX_EXTRA: &[Row] = &[
    ("standby", "1", true, Some("mdi:power-standby")),
    ("menu", "45", true, Some("mdi:menu")),
    ("back", "25", true, Some("mdi:arrow-left")),
    ("select", "31", true, Some("mdi:check")),
    ("cursor_up", "27", true, Some("mdi:arrow-up")),
    ("cursor_left", "29", true, Some("mdi:arrow-left")),
    ("cursor_right", "33", true, Some("mdi:arrow-right")),
    ("cursor_down", "35", true, Some("mdi:arrow-down")),
    ("guide", "21", true, Some("mdi:television-guide")),
    ("digit_1", "3", true, Some("mdi:numeric-1-box")),
    ("digit_2", "5", true, Some("mdi:numeric-2-box")),
    ("digit_3", "7", true, Some("mdi:numeric-3-box")),
    ("digit_4", "9", true, Some("mdi:numeric-4-box")),
    ("digit_5", "11", true, Some("mdi:numeric-5-box")),
    ("digit_6", "13", true, Some("mdi:numeric-6-box")),
    ("digit_7", "15", true, Some("mdi:numeric-7-box")),
    ("digit_8", "17", true, Some("mdi:numeric-8-box")),
    ("digit_9", "19", true, Some("mdi:numeric-9-box")),
    ("digit_0", "23", true, Some("mdi:numeric-0-box")),
];

const DVD_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("play", "Play", false, None),
    ("pause", "Pause", false, None),
    ("stop", "Stop", false, None),
    ("next_track", "Next", false, None),
    ("previous_track", "Previous", false, None),
    ("mute", "setMute", false, Some("mdi:volume-mute")),
];

const DVD_EXTRA: &[Row] = &[
    ("fast_forward", "FastForward", false, Some("mdi:fast-forward")),
    ("rewind", "Rewind", false, Some("mdi:rewind")),
    ("menu", "35", true, Some("mdi:menu")),
    ("back", "37", true, Some("mdi:arrow-left")),
    ("select", "5", true, Some("mdi:check")),
    ("cursor_up", "3", true, Some("mdi:arrow-up")),
    ("cursor_left", "1", true, Some("mdi:arrow-left")),
    ("cursor_right", "9", true, Some("mdi:arrow-right")),
    ("cursor_down", "7", true, Some("mdi:arrow-down")),
    ("title", "31", true, Some("mdi:format-title")),
    ("skip", "33", true, Some("mdi:skip-forward")),
    ("format", "27", true, Some("mdi:format-align-center")),
];

const SPEAKER_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("play", "Play", false, None),
    ("pause", "Pause", false, None),
    ("stop", "Stop", false, None),
    ("next_track", "Next", false, None),
    ("previous_track", "Previous", false, None),
    ("volume_up", "volumeAdd", false, None),
    ("volume_down", "volumeSub", false, None),
    ("mute", "setMute", false, Some("mdi:volume-mute")),
];

const SPEAKER_EXTRA: &[Row] = &[
    ("select", "5", true, Some("mdi:check")),
    ("cursor_up", "3", true, Some("mdi:arrow-up")),
    ("cursor_left", "1", true, Some("mdi:arrow-left")),
    ("cursor_right", "9", true, Some("mdi:arrow-right")),
    ("cursor_down", "7", true, Some("mdi:arrow-down")),
    ("AudioP", "13", true, Some("mdi:format-title")),
    ("AudioM", "17", true, Some("mdi:format-title")),
    ("fast_forward", "FastForward", false, Some("mdi:fast-forward")),
    ("rewind", "Rewind", false, Some("mdi:rewind")),
    ("menu", "33", true, Some("mdi:menu")),
    ("back", "35", true, Some("mdi:arrow-left")),
];

// Select doubles as the play/pause toggle on the stock projector remote.
const PROJECTOR_BASIC: &[Row] = &[
    ("turn_on", "turnOn", false, None),
    ("turn_off", "turnOff", false, None),
    ("play", "21", true, None),
    ("pause", "21", true, None),
    ("volume_up", "33", true, None),
    ("volume_down", "35", true, None),
    ("mute", "37", true, Some("mdi:volume-mute")),
];

const PROJECTOR_EXTRA: &[Row] = &[
    ("source_computer", "5", true, Some("mdi:laptop")),
    ("source_video", "7", true, Some("mdi:video")),
    ("source_signal", "9", true, Some("mdi:signal")),
    ("menu", "19", true, Some("mdi:menu")),
    ("select", "21", true, Some("mdi:check")),
    ("cursor_up", "23", true, Some("mdi:arrow-up")),
    ("cursor_left", "25", true, Some("mdi:arrow-left")),
    ("cursor_right", "27", true, Some("mdi:arrow-right")),
    ("cursor_down", "29", true, Some("mdi:arrow-down")),
    ("exit", "31", true, Some("mdi:exit-to-app")),
    ("auto", "39", true, Some("mdi:auto-fix")),
    ("focus_in", "11", true, Some("mdi:magnify-plus")),
    ("focus_out", "13", true, Some("mdi:magnify-minus")),
    ("picture_up", "15", true, Some("mdi:image-plus")),
    ("picture_down", "17", true, Some("mdi:image-minus")),
    ("mode", "43", true, Some("mdi:projector-screen")),
];

fn entry(row: &Row) -> CommandEntry {
    let (key, action, customizable, icon) = *row;
    CommandEntry {
        key: key.to_string(),
        action: action.to_string(),
        customizable,
        icon: icon.map(str::to_string),
    }
}

fn rows_for(device_type: DeviceType) -> (&'static [Row], &'static [Row]) {
    match device_type {
        DeviceType::Tv => (TV_BASIC, TV_EXTRA),
        DeviceType::Iptv => (IPTV_BASIC, IPTV_EXTRA),
        DeviceType::SetTopBox => (SET_TOP_BOX_BASIC, SET_TOP_BOX_EXTRA),
        DeviceType::Dvd => (DVD_BASIC, DVD_EXTRA),
        DeviceType::Speaker => (SPEAKER_BASIC, SPEAKER_EXTRA),
        DeviceType::Projector => (PROJECTOR_BASIC, PROJECTOR_EXTRA),
        DeviceType::Light | DeviceType::DiyLight => (LIGHT_BASIC, &[]),
        DeviceType::Others => (&[], &[]),
        _ => (POWER, &[]),
    }
}

pub(super) fn catalog() -> CommandCatalog {
    let mut builder = CommandCatalog::builder();
    for device_type in DeviceType::ALL {
        let (basic, extra) = rows_for(device_type);
        for row in basic {
            builder = builder.entry(device_type, Tier::Basic, entry(row));
        }
        for row in extra {
            builder = builder.entry(device_type, Tier::Extra, entry(row));
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_unique_keys_per_table() {
        let tables = [
            TV_BASIC,
            TV_EXTRA,
            IPTV_BASIC,
            IPTV_EXTRA,
            SET_TOP_BOX_BASIC,
            SET_TOP_BOX_EXTRA,
            DVD_BASIC,
            DVD_EXTRA,
            SPEAKER_BASIC,
            SPEAKER_EXTRA,
            PROJECTOR_BASIC,
            PROJECTOR_EXTRA,
            LIGHT_BASIC,
        ];
        for table in tables {
            let mut keys: Vec<&str> = table.iter().map(|row| row.0).collect();
            let len = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), len);
        }
    }

    #[test]
    fn should_give_diy_media_types_power_only() {
        let catalog = catalog();
        assert_eq!(catalog.commands(DeviceType::DiyTv, Tier::Basic).count(), 2);
        assert_eq!(catalog.commands(DeviceType::DiyTv, Tier::Extra).count(), 0);
    }

    #[test]
    fn should_give_diy_light_full_light_table() {
        let catalog = catalog();
        assert!(
            catalog
                .lookup(DeviceType::DiyLight, Tier::Basic, "brightness_down")
                .is_some()
        );
    }
}
