//! Command catalog: what IR payload each abstract action maps to.
//!
//! The catalog is a plain value built once at start-up and shared by
//! reference. It is never mutated afterwards.

mod builtin;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::device_type::DeviceType;

/// Icon used for commands the catalog knows nothing about.
pub const GENERIC_ICON: &str = "mdi:remote";

/// One sendable command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    /// Catalog key, e.g. `"volume_up"`.
    pub key: String,
    /// Vendor action: a canonical name (`"volumeAdd"`) or a learned code (`"13"`).
    pub action: String,
    /// `true` when `action` is a code learned by one physical remote
    /// rather than a brand-wide canonical action.
    pub customizable: bool,
    pub icon: Option<String>,
}

impl CommandEntry {
    /// A canonical, brand-wide command.
    #[must_use]
    pub fn canonical(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
            customizable: false,
            icon: None,
        }
    }

    /// A command learned by one specific physical remote.
    #[must_use]
    pub fn learned(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
            customizable: true,
            icon: None,
        }
    }

    /// Attach an icon hint.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Entry used for an extra command that has no catalog row: the name
    /// itself is sent as a learned code.
    #[must_use]
    pub fn fallback(name: &str) -> Self {
        Self::learned(name, name).with_icon(GENERIC_ICON)
    }
}

/// Catalog tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Standard controls usable regardless of user customization.
    Basic,
    /// Class-specific controls, each individually opt-in.
    Extra,
}

#[derive(Debug, Default, Clone)]
struct Tables {
    basic: BTreeMap<String, CommandEntry>,
    extra: BTreeMap<String, CommandEntry>,
}

impl Tables {
    fn tier(&self, tier: Tier) -> &BTreeMap<String, CommandEntry> {
        match tier {
            Tier::Basic => &self.basic,
            Tier::Extra => &self.extra,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut BTreeMap<String, CommandEntry> {
        match tier {
            Tier::Basic => &mut self.basic,
            Tier::Extra => &mut self.extra,
        }
    }
}

/// Immutable map of device type → tier → command name → entry.
#[derive(Debug, Default, Clone)]
pub struct CommandCatalog {
    tables: BTreeMap<DeviceType, Tables>,
}

impl CommandCatalog {
    /// The catalog shipped with irhub.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Start building a custom catalog.
    #[must_use]
    pub fn builder() -> CommandCatalogBuilder {
        CommandCatalogBuilder::default()
    }

    /// Exact-match, case-sensitive lookup.
    #[must_use]
    pub fn lookup(&self, device_type: DeviceType, tier: Tier, name: &str) -> Option<&CommandEntry> {
        self.tables
            .get(&device_type)
            .and_then(|tables| tables.tier(tier).get(name))
    }

    /// Look up an extra command, falling back to a learned command named
    /// after `name` when the catalog has no row for it.
    #[must_use]
    pub fn resolve_extra(&self, device_type: DeviceType, name: &str) -> CommandEntry {
        self.lookup(device_type, Tier::Extra, name)
            .cloned()
            .unwrap_or_else(|| CommandEntry::fallback(name))
    }

    /// Test-only: iterate all entries of one device type and tier.
    #[cfg(test)]
    pub(crate) fn commands(
        &self,
        device_type: DeviceType,
        tier: Tier,
    ) -> impl Iterator<Item = &CommandEntry> {
        self.tables
            .get(&device_type)
            .into_iter()
            .flat_map(move |tables| tables.tier(tier).values())
    }
}

/// Step-by-step builder for [`CommandCatalog`].
#[derive(Debug, Default)]
pub struct CommandCatalogBuilder {
    tables: BTreeMap<DeviceType, Tables>,
}

impl CommandCatalogBuilder {
    /// Add (or replace) one entry, keyed by `entry.key`.
    #[must_use]
    pub fn entry(mut self, device_type: DeviceType, tier: Tier, entry: CommandEntry) -> Self {
        self.tables
            .entry(device_type)
            .or_default()
            .tier_mut(tier)
            .insert(entry.key.clone(), entry);
        self
    }

    /// Consume the builder.
    #[must_use]
    pub fn build(self) -> CommandCatalog {
        CommandCatalog {
            tables: self.tables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_find_canonical_basic_command() {
        let catalog = CommandCatalog::builtin();
        let entry = catalog
            .lookup(DeviceType::Tv, Tier::Basic, "volume_up")
            .unwrap();
        assert_eq!(entry.action, "volumeAdd");
        assert!(!entry.customizable);
    }

    #[test]
    fn should_find_learned_basic_command_with_icon() {
        let catalog = CommandCatalog::builtin();
        let entry = catalog.lookup(DeviceType::Tv, Tier::Basic, "mute").unwrap();
        assert_eq!(entry.action, "13");
        assert!(entry.customizable);
        assert_eq!(entry.icon.as_deref(), Some("mdi:volume-mute"));
    }

    #[test]
    fn should_return_none_on_miss() {
        let catalog = CommandCatalog::builtin();
        assert!(catalog.lookup(DeviceType::Dvd, Tier::Basic, "volume_up").is_none());
        assert!(catalog.lookup(DeviceType::Others, Tier::Basic, "turn_on").is_none());
    }

    #[test]
    fn should_be_case_sensitive() {
        let catalog = CommandCatalog::builtin();
        assert!(catalog.lookup(DeviceType::Speaker, Tier::Extra, "AudioP").is_some());
        assert!(catalog.lookup(DeviceType::Speaker, Tier::Extra, "audiop").is_none());
    }

    #[test]
    fn should_return_equal_entries_on_repeated_lookup() {
        let catalog = CommandCatalog::builtin();
        for ty in DeviceType::ALL {
            for tier in [Tier::Basic, Tier::Extra] {
                for name in ["turn_on", "play", "menu", "digit_0", "nope"] {
                    let first = catalog.lookup(ty, tier, name).cloned();
                    let second = catalog.lookup(ty, tier, name).cloned();
                    assert_eq!(first, second);
                }
            }
        }
    }

    #[test]
    fn should_fall_back_to_learned_command_for_unknown_extra() {
        let catalog = CommandCatalog::builtin();
        let entry = catalog.resolve_extra(DeviceType::Fan, "ION");
        assert_eq!(entry.action, "ION");
        assert!(entry.customizable);
        assert_eq!(entry.icon.as_deref(), Some(GENERIC_ICON));
    }

    #[test]
    fn should_prefer_catalog_row_over_fallback_for_extra() {
        let catalog = CommandCatalog::builtin();
        let entry = catalog.resolve_extra(DeviceType::Dvd, "fast_forward");
        assert_eq!(entry.action, "FastForward");
        assert!(!entry.customizable);
    }

    #[test]
    fn should_share_play_and_pause_code_on_projector() {
        let catalog = CommandCatalog::builtin();
        let play = catalog.lookup(DeviceType::Projector, Tier::Basic, "play").unwrap();
        let pause = catalog.lookup(DeviceType::Projector, Tier::Basic, "pause").unwrap();
        assert_eq!(play.action, pause.action);
    }

    #[test]
    fn should_give_power_commands_to_every_type_but_others() {
        let catalog = CommandCatalog::builtin();
        for ty in DeviceType::ALL {
            let has_on = catalog.lookup(ty, Tier::Basic, "turn_on").is_some();
            let has_off = catalog.lookup(ty, Tier::Basic, "turn_off").is_some();
            let expected = ty != DeviceType::Others;
            assert_eq!(has_on, expected, "{ty}");
            assert_eq!(has_off, expected, "{ty}");
        }
    }

    #[test]
    fn should_build_custom_catalog() {
        let catalog = CommandCatalog::builder()
            .entry(
                DeviceType::Others,
                Tier::Basic,
                CommandEntry::learned("turn_on", "POWER"),
            )
            .build();
        let entry = catalog
            .lookup(DeviceType::Others, Tier::Basic, "turn_on")
            .unwrap();
        assert_eq!(entry.action, "POWER");
        assert!(catalog.lookup(DeviceType::Tv, Tier::Basic, "turn_on").is_none());
    }
}
