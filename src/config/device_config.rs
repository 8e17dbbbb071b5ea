// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration for one infrared-controlled air conditioner.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValueError};
use crate::transport::DeviceHandle;

use super::{DeviceModel, ModelQuirks, ProtocolVersion};

/// Configuration of one air conditioner behind a Tuya IR blaster.
///
/// Deserializes from the platform's config entry. Both the current key names
/// (`device_id`, `device_local_key`, ...) and the older `tuya_*` spellings
/// are accepted.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::config::{DeviceConfig, DeviceModel, ProtocolVersion};
///
/// let config = DeviceConfig::new("bf1234567890abcdef", "0123456789abcdef", "192.168.1.40")
///     .with_name("Bedroom AC")
///     .with_model(DeviceModel::MscGe35vb)
///     .with_version(ProtocolVersion::V33);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.unique_id(), "climate Bedroom AC");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Display name of the air conditioner.
    #[serde(rename = "ac_name", alias = "name", default = "default_name")]
    pub name: String,

    /// Tuya device identifier of the IR blaster.
    #[serde(alias = "tuya_ir_device_id")]
    pub device_id: String,

    /// Tuya local key used to encrypt traffic to the blaster.
    #[serde(rename = "device_local_key", alias = "tuya_device_local_key")]
    pub local_key: String,

    /// IP address of the blaster on the local network.
    #[serde(rename = "device_ip", alias = "tuya_device_ip")]
    pub ip: String,

    /// Tuya protocol version.
    #[serde(rename = "device_version", alias = "tuya_device_version", default)]
    pub version: ProtocolVersion,

    /// Air conditioner model, selecting the code table.
    #[serde(rename = "device_model", alias = "tuya_device_model", default)]
    pub model: DeviceModel,

    /// Optional entity id of an external temperature sensor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_sensor: Option<String>,

    /// Overrides the model's built-in quirks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quirks: Option<ModelQuirks>,
}

fn default_name() -> String {
    DeviceConfig::DEFAULT_NAME.to_string()
}

impl DeviceConfig {
    /// Name used when none is configured.
    pub const DEFAULT_NAME: &'static str = "Air Conditioner";

    /// Creates a configuration with default name, model and version.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        local_key: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            name: default_name(),
            device_id: device_id.into(),
            local_key: local_key.into(),
            ip: ip.into(),
            version: ProtocolVersion::default(),
            model: DeviceModel::default(),
            temperature_sensor: None,
            quirks: None,
        }
    }

    /// Parses a configuration from a JSON config entry.
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` if the entry cannot be deserialized,
    /// or the first validation failure.
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the protocol version.
    #[must_use]
    pub fn with_version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the air conditioner model.
    #[must_use]
    pub fn with_model(mut self, model: DeviceModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the external temperature sensor entity.
    #[must_use]
    pub fn with_temperature_sensor(mut self, entity_id: impl Into<String>) -> Self {
        self.temperature_sensor = Some(entity_id.into());
        self
    }

    /// Overrides the model quirks.
    #[must_use]
    pub fn with_quirks(mut self, quirks: ModelQuirks) -> Self {
        self.quirks = Some(quirks);
        self
    }

    /// Returns the effective quirks: the override if set, else the model's.
    #[must_use]
    pub fn quirks(&self) -> ModelQuirks {
        self.quirks.unwrap_or_else(|| self.model.quirks())
    }

    /// Returns the platform unique id for the climate entity.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("climate {}", self.name)
    }

    /// Checks that every required field is present and well-formed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` for an empty id, key, address or
    /// model, and `ConfigError::InvalidField` for an unparseable address or
    /// a model name that cannot name a table file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.trim().is_empty() {
            return Err(ConfigError::MissingField("device_id"));
        }
        if self.local_key.is_empty() {
            return Err(ConfigError::MissingField("device_local_key"));
        }
        if self.ip.trim().is_empty() {
            return Err(ConfigError::MissingField("device_ip"));
        }
        if self.model.as_str().is_empty() {
            return Err(ConfigError::MissingField("device_model"));
        }
        if !self.model.has_valid_name() {
            return Err(ConfigError::InvalidField {
                field: "device_model",
                source: ValueError::InvalidModel(self.model.to_string()),
            });
        }
        self.ip
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidField {
                field: "device_ip",
                source: ValueError::InvalidAddress(self.ip.clone()),
            })?;
        Ok(())
    }

    /// Builds the transport handle for the configured blaster.
    #[must_use]
    pub fn handle(&self) -> DeviceHandle {
        DeviceHandle::new(
            self.device_id.trim(),
            self.local_key.clone(),
            self.ip.trim(),
            self.version,
        )
    }
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("name", &self.name)
            .field("device_id", &self.device_id)
            .field("local_key", &"<redacted>")
            .field("ip", &self.ip)
            .field("version", &self.version)
            .field("model", &self.model)
            .field("temperature_sensor", &self.temperature_sensor)
            .field("quirks", &self.quirks)
            .finish()
    }
}
