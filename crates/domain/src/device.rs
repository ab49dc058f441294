//! Remote device: one discovered IR-controllable appliance.

use serde::{Deserialize, Serialize};

use crate::device_type::{DeviceClass, DeviceType};
use crate::error::{IrHubError, ValidationError};
use crate::id::RemoteId;

/// Identity of one IR remote. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDevice {
    pub id: RemoteId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

impl RemoteDevice {
    /// Create a validated remote device.
    ///
    /// # Errors
    ///
    /// Returns [`IrHubError::Validation`] when the id or the name is blank.
    pub fn new(
        id: RemoteId,
        name: impl Into<String>,
        device_type: DeviceType,
    ) -> Result<Self, IrHubError> {
        let device = Self {
            id,
            name: name.into(),
            device_type,
        };
        device.validate()?;
        Ok(device)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IrHubError::Validation`] when the id or the name is blank.
    pub fn validate(&self) -> Result<(), IrHubError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyRemoteId.into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Shorthand for `self.device_type.class()`.
    #[must_use]
    pub fn class(&self) -> DeviceClass {
        self.device_type.class()
    }

    /// Model string shown to the host, e.g. `"Media Remote"`.
    #[must_use]
    pub fn model(&self) -> String {
        format!("{} Remote", self.class().label())
    }
}
