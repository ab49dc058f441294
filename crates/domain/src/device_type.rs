//! Device types, their coarse classes, and media behaviour families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Appliance type as reported by the bridge vendor.
///
/// Every type except [`Others`](Self::Others) has a `DIY` twin: a remote the
/// user taught by hand instead of picking from the vendor's code library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DeviceType {
    AirConditioner,
    DiyAirConditioner,
    Fan,
    DiyFan,
    AirPurifier,
    DiyAirPurifier,
    Light,
    DiyLight,
    Tv,
    DiyTv,
    Iptv,
    DiyIptv,
    Dvd,
    DiyDvd,
    Speaker,
    DiySpeaker,
    SetTopBox,
    DiySetTopBox,
    Projector,
    DiyProjector,
    Camera,
    DiyCamera,
    VacuumCleaner,
    DiyVacuumCleaner,
    WaterHeater,
    DiyWaterHeater,
    Others,
}

impl DeviceType {
    /// Every supported type, in declaration order.
    pub const ALL: [Self; 27] = [
        Self::AirConditioner,
        Self::DiyAirConditioner,
        Self::Fan,
        Self::DiyFan,
        Self::AirPurifier,
        Self::DiyAirPurifier,
        Self::Light,
        Self::DiyLight,
        Self::Tv,
        Self::DiyTv,
        Self::Iptv,
        Self::DiyIptv,
        Self::Dvd,
        Self::DiyDvd,
        Self::Speaker,
        Self::DiySpeaker,
        Self::SetTopBox,
        Self::DiySetTopBox,
        Self::Projector,
        Self::DiyProjector,
        Self::Camera,
        Self::DiyCamera,
        Self::VacuumCleaner,
        Self::DiyVacuumCleaner,
        Self::WaterHeater,
        Self::DiyWaterHeater,
        Self::Others,
    ];

    /// The vendor's identifier string for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AirConditioner => "Air Conditioner",
            Self::DiyAirConditioner => "DIY Air Conditioner",
            Self::Fan => "Fan",
            Self::DiyFan => "DIY Fan",
            Self::AirPurifier => "Air Purifier",
            Self::DiyAirPurifier => "DIY Air Purifier",
            Self::Light => "Light",
            Self::DiyLight => "DIY Light",
            Self::Tv => "TV",
            Self::DiyTv => "DIY TV",
            Self::Iptv => "IPTV",
            Self::DiyIptv => "DIY IPTV",
            Self::Dvd => "DVD",
            Self::DiyDvd => "DIY DVD",
            Self::Speaker => "Speaker",
            Self::DiySpeaker => "DIY Speaker",
            Self::SetTopBox => "Set Top Box",
            Self::DiySetTopBox => "DIY Set Top Box",
            Self::Projector => "Projector",
            Self::DiyProjector => "DIY Projector",
            Self::Camera => "Camera",
            Self::DiyCamera => "DIY Camera",
            Self::VacuumCleaner => "Vacuum Cleaner",
            Self::DiyVacuumCleaner => "DIY Vacuum Cleaner",
            Self::WaterHeater => "Water Heater",
            Self::DiyWaterHeater => "DIY Water Heater",
            Self::Others => "Others",
        }
    }

    /// The coarse class this type belongs to.
    #[must_use]
    pub const fn class(self) -> DeviceClass {
        match self {
            Self::AirConditioner | Self::DiyAirConditioner => DeviceClass::Climate,
            Self::Fan | Self::DiyFan | Self::AirPurifier | Self::DiyAirPurifier => {
                DeviceClass::Fan
            }
            Self::Light | Self::DiyLight => DeviceClass::Light,
            Self::Tv
            | Self::DiyTv
            | Self::Iptv
            | Self::DiyIptv
            | Self::Dvd
            | Self::DiyDvd
            | Self::Speaker
            | Self::DiySpeaker
            | Self::SetTopBox
            | Self::DiySetTopBox
            | Self::Projector
            | Self::DiyProjector => DeviceClass::Media,
            Self::Camera | Self::DiyCamera => DeviceClass::Camera,
            Self::VacuumCleaner | Self::DiyVacuumCleaner => DeviceClass::Vacuum,
            Self::WaterHeater | Self::DiyWaterHeater => DeviceClass::WaterHeater,
            Self::Others => DeviceClass::Other,
        }
    }

    /// The media behaviour family, or `None` for non-media types.
    #[must_use]
    pub const fn media_family(self) -> Option<MediaFamily> {
        match self {
            Self::Tv | Self::DiyTv => Some(MediaFamily::Tv),
            Self::Iptv | Self::DiyIptv => Some(MediaFamily::Iptv),
            Self::SetTopBox | Self::DiySetTopBox => Some(MediaFamily::SetTopBox),
            Self::Dvd | Self::DiyDvd => Some(MediaFamily::Disc),
            Self::Speaker | Self::DiySpeaker => Some(MediaFamily::Speaker),
            Self::Projector | Self::DiyProjector => Some(MediaFamily::Projector),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDeviceType(s.to_string()))
    }
}

impl TryFrom<String> for DeviceType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceType> for &'static str {
    fn from(value: DeviceType) -> Self {
        value.as_str()
    }
}

/// Coarse category used to pick an entity kind and default behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Climate,
    Fan,
    Light,
    Media,
    Camera,
    Vacuum,
    WaterHeater,
    Other,
}

impl DeviceClass {
    /// Human-readable label, used for device model strings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Climate => "Air Conditioner",
            Self::Fan => "Fan",
            Self::Light => "Light",
            Self::Media => "Media",
            Self::Camera => "Camera",
            Self::Vacuum => "Vacuum",
            Self::WaterHeater => "Water Heater",
            Self::Other => "Others",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Climate => "mdi:air-conditioner",
            Self::Fan => "mdi:fan",
            Self::Light => "mdi:lightbulb",
            Self::Media => "mdi:television",
            Self::Camera => "mdi:camera",
            Self::Vacuum => "mdi:robot-vacuum",
            Self::WaterHeater => "mdi:water-boiler",
            Self::Other => "mdi:remote",
        }
    }
}

/// Behaviour group within the media class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFamily {
    Tv,
    Iptv,
    SetTopBox,
    Disc,
    Speaker,
    Projector,
}

impl MediaFamily {
    /// Whether powering on lands in an idle/loading state instead of `on`.
    #[must_use]
    pub const fn idles_after_power_on(self) -> bool {
        matches!(self, Self::Disc | Self::Speaker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_type_from_its_own_label() {
        for ty in DeviceType::ALL {
            assert_eq!(ty.as_str().parse::<DeviceType>().unwrap(), ty);
        }
    }

    #[test]
    fn should_reject_label_with_wrong_case() {
        let result = "tv".parse::<DeviceType>();
        assert_eq!(
            result,
            Err(ValidationError::UnknownDeviceType("tv".to_string()))
        );
    }

    #[test]
    fn should_map_diy_variant_to_same_class() {
        assert_eq!(DeviceType::DiyTv.class(), DeviceClass::Media);
        assert_eq!(DeviceType::DiyAirPurifier.class(), DeviceClass::Fan);
        assert_eq!(DeviceType::DiyLight.class(), DeviceClass::Light);
    }

    #[test]
    fn should_have_media_family_only_for_media_class() {
        for ty in DeviceType::ALL {
            assert_eq!(
                ty.media_family().is_some(),
                ty.class() == DeviceClass::Media,
                "{ty}"
            );
        }
    }

    #[test]
    fn should_idle_after_power_on_for_disc_and_speaker_only() {
        assert!(MediaFamily::Disc.idles_after_power_on());
        assert!(MediaFamily::Speaker.idles_after_power_on());
        assert!(!MediaFamily::Tv.idles_after_power_on());
        assert!(!MediaFamily::Projector.idles_after_power_on());
    }

    #[test]
    fn should_roundtrip_through_serde_json_as_vendor_label() {
        let json = serde_json::to_string(&DeviceType::SetTopBox).unwrap();
        assert_eq!(json, "\"Set Top Box\"");
        let parsed: DeviceType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DeviceType::SetTopBox);
    }
}
