// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute map exchanged with the home-automation platform.

use serde::{Deserialize, Serialize};

/// Believed state as a flat key-value map.
///
/// This is what the controller publishes after every command and what the
/// platform hands back on restart. Values are kept as loosely typed as the
/// platform stores them; they are validated when restored into a
/// [`DeviceState`](super::DeviceState).
///
/// Older installations persisted the same values under `internal_*` keys;
/// those spellings are accepted when deserializing.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::state::StateAttributes;
///
/// let json = r#"{"internal_is_on": true, "internal_hvac_mode": "heat_cool", "internal_temp": 22}"#;
/// let attributes = StateAttributes::from_json(json).unwrap();
///
/// assert_eq!(attributes.is_on, Some(true));
/// assert_eq!(attributes.mode.as_deref(), Some("heat_cool"));
/// assert_eq!(attributes.fan_speed, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateAttributes {
    /// Whether the unit is believed to be on.
    #[serde(default, alias = "internal_is_on")]
    pub is_on: Option<bool>,

    /// Believed HVAC mode.
    #[serde(default, alias = "internal_hvac_mode", alias = "hvac_mode")]
    pub mode: Option<String>,

    /// Believed fan speed.
    #[serde(default, alias = "internal_fan_mode", alias = "fan_mode")]
    pub fan_speed: Option<String>,

    /// Believed target temperature.
    #[serde(default, alias = "internal_temp", alias = "temperature")]
    pub temp: Option<f64>,

    /// Latest reading from the external temperature sensor, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_temperature: Option<f64>,
}

impl StateAttributes {
    /// Parses attributes from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts attributes from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns error if the value is not an object of the expected shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Converts the attributes to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
