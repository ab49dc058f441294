//! Per-remote user customization.

use serde::{Deserialize, Serialize};

use crate::id::SensorId;

/// Options a user sets on one remote. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteOptions {
    /// Observable whose on/off value overrides power belief.
    pub power_sensor: Option<SensorId>,
    /// Extra commands exposed as buttons.
    pub customize_commands: Vec<String>,
    pub with_brightness: bool,
    pub with_temperature: bool,
    pub with_ion: bool,
    pub with_timer: bool,
    /// Learned command used as turn-on by `Others` remotes.
    pub on_command: Option<String>,
    /// Learned command used as turn-off by `Others` remotes.
    pub off_command: Option<String>,
}

impl RemoteOptions {
    /// Non-blank custom commands, trimmed, first occurrence wins.
    pub fn custom_commands(&self) -> impl Iterator<Item = &str> {
        let mut seen = Vec::new();
        self.customize_commands
            .iter()
            .map(|cmd| cmd.trim())
            .filter(move |cmd| {
                if cmd.is_empty() || seen.contains(cmd) {
                    return false;
                }
                seen.push(*cmd);
                true
            })
    }

    #[must_use]
    pub fn on_command(&self) -> Option<&str> {
        non_blank(self.on_command.as_deref())
    }

    #[must_use]
    pub fn off_command(&self) -> Option<&str> {
        non_blank(self.off_command.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_every_field() {
        let options: RemoteOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RemoteOptions::default());
    }

    #[test]
    fn should_skip_blank_and_duplicate_custom_commands() {
        let options = RemoteOptions {
            customize_commands: vec![
                "POWER".to_string(),
                "  ".to_string(),
                "MODE ".to_string(),
                "POWER".to_string(),
            ],
            ..RemoteOptions::default()
        };
        let commands: Vec<&str> = options.custom_commands().collect();
        assert_eq!(commands, ["POWER", "MODE"]);
    }

    #[test]
    fn should_treat_blank_power_command_as_absent() {
        let options = RemoteOptions {
            on_command: Some(" ".to_string()),
            off_command: Some("OFF".to_string()),
            ..RemoteOptions::default()
        };
        assert_eq!(options.on_command(), None);
        assert_eq!(options.off_command(), Some("OFF"));
    }
}
