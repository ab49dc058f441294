//! Capability resolver: which controls make sense for a device type.

use bitflags::bitflags;

use crate::device_type::{DeviceType, MediaFamily};

bitflags! {
    /// Controls an entity advertises to the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct CapabilitySet: u16 {
        const POWER         = 1 << 0;
        const VOLUME_STEP   = 1 << 1;
        const MUTE          = 1 << 2;
        const PLAY_MEDIA    = 1 << 3;
        const PLAY          = 1 << 4;
        const PAUSE         = 1 << 5;
        const PREVIOUS_NEXT = 1 << 6;
        const STOP          = 1 << 7;
    }
}

/// Derive the capability set for a device type.
///
/// Pure and total. Non-media types only get [`CapabilitySet::POWER`]; media
/// types accumulate flags from family membership rules, which only ever OR
/// bits in, so their order is irrelevant.
#[must_use]
pub fn resolve(device_type: DeviceType) -> CapabilitySet {
    let mut caps = CapabilitySet::POWER;
    let Some(family) = device_type.media_family() else {
        return caps;
    };

    if family != MediaFamily::Disc {
        caps |= CapabilitySet::VOLUME_STEP;
    }
    if family != MediaFamily::SetTopBox {
        caps |= CapabilitySet::MUTE;
    }
    if matches!(
        family,
        MediaFamily::Tv | MediaFamily::Iptv | MediaFamily::SetTopBox
    ) {
        caps |= CapabilitySet::VOLUME_STEP | CapabilitySet::PLAY_MEDIA;
    }
    if matches!(
        family,
        MediaFamily::Iptv | MediaFamily::Disc | MediaFamily::Speaker | MediaFamily::Projector
    ) {
        caps |= CapabilitySet::PLAY;
        if family != MediaFamily::Iptv {
            caps |= CapabilitySet::PAUSE;
        }
    }
    if matches!(family, MediaFamily::Disc | MediaFamily::Speaker) {
        caps |= CapabilitySet::PREVIOUS_NEXT | CapabilitySet::STOP;
    }

    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: CapabilitySet = CapabilitySet::POWER;
    const V: CapabilitySet = CapabilitySet::VOLUME_STEP;
    const M: CapabilitySet = CapabilitySet::MUTE;
    const PM: CapabilitySet = CapabilitySet::PLAY_MEDIA;
    const PL: CapabilitySet = CapabilitySet::PLAY;
    const PA: CapabilitySet = CapabilitySet::PAUSE;
    const PN: CapabilitySet = CapabilitySet::PREVIOUS_NEXT;
    const ST: CapabilitySet = CapabilitySet::STOP;

    fn fixture(family: MediaFamily) -> CapabilitySet {
        match family {
            MediaFamily::Tv => P.union(V).union(M).union(PM),
            MediaFamily::Iptv => P.union(V).union(M).union(PM).union(PL),
            MediaFamily::SetTopBox => P.union(V).union(PM),
            MediaFamily::Disc => P.union(M).union(PL).union(PA).union(PN).union(ST),
            MediaFamily::Speaker => P
                .union(V)
                .union(M)
                .union(PL)
                .union(PA)
                .union(PN)
                .union(ST),
            MediaFamily::Projector => P.union(V).union(M).union(PL).union(PA),
        }
    }

    #[test]
    fn should_match_fixture_table_for_every_media_type() {
        for ty in DeviceType::ALL {
            if let Some(family) = ty.media_family() {
                assert_eq!(resolve(ty), fixture(family), "{ty}");
            }
        }
    }

    #[test]
    fn should_give_only_power_to_non_media_types() {
        for ty in DeviceType::ALL {
            if ty.media_family().is_none() {
                assert_eq!(resolve(ty), CapabilitySet::POWER, "{ty}");
            }
        }
    }

    #[test]
    fn should_resolve_diy_variant_like_vendor_variant() {
        assert_eq!(resolve(DeviceType::DiySpeaker), resolve(DeviceType::Speaker));
        assert_eq!(resolve(DeviceType::DiyIptv), resolve(DeviceType::Iptv));
    }

    #[test]
    fn should_return_same_set_on_repeated_calls() {
        for ty in DeviceType::ALL {
            assert_eq!(resolve(ty), resolve(ty));
        }
    }

    #[test]
    fn should_not_give_pause_to_iptv() {
        let caps = resolve(DeviceType::Iptv);
        assert!(caps.contains(CapabilitySet::PLAY));
        assert!(!caps.contains(CapabilitySet::PAUSE));
    }
}
