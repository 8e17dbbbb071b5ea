// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air conditioner models and Tuya protocol versions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Air conditioner model, which selects the code table.
///
/// Models without a dedicated variant are represented by
/// [`DeviceModel::Custom`]; their table is looked up by the same name.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::config::DeviceModel;
///
/// let model: DeviceModel = "msz-ge25va".parse().unwrap();
/// assert_eq!(model, DeviceModel::MszGe25va);
/// assert_eq!(model.as_str(), "MSZ-GE25VA");
///
/// let other: DeviceModel = "SRK25ZS".parse().unwrap();
/// assert_eq!(other, DeviceModel::custom("SRK25ZS"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceModel {
    /// Mitsubishi MSZ-GE25VA.
    #[default]
    MszGe25va,
    /// Mitsubishi MSC-GE35VB.
    MscGe35vb,
    /// Any other model with a code table of the same name.
    Custom(String),
}

impl DeviceModel {
    /// Creates a custom model.
    ///
    /// The name is not checked here; [`DeviceModel::has_valid_name`] tells
    /// whether it can name a table file.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Returns true if the name stays inside a table directory.
    ///
    /// Path separators and `..` are rejected.
    #[must_use]
    pub fn has_valid_name(&self) -> bool {
        is_table_name(self.as_str())
    }

    /// Returns the model name, which is also its table name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MszGe25va => "MSZ-GE25VA",
            Self::MscGe35vb => "MSC-GE35VB",
            Self::Custom(name) => name,
        }
    }

    /// Returns the code table quirks known for this model.
    // Both bundled models resolve dry mode at the requested fan speed.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn quirks(&self) -> ModelQuirks {
        ModelQuirks::default()
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_table_name(name: &str) -> bool {
    !name.contains(['/', '\\', '\0']) && !name.contains("..")
}

impl FromStr for DeviceModel {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for DeviceModel {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let name = value.trim();
        match name.to_uppercase().as_str() {
            "MSZ-GE25VA" => Ok(Self::MszGe25va),
            "MSC-GE35VB" => Ok(Self::MscGe35vb),
            _ if is_table_name(name) => Ok(Self::Custom(name.to_string())),
            _ => Err(ValueError::InvalidModel(value)),
        }
    }
}

impl From<DeviceModel> for String {
    fn from(value: DeviceModel) -> Self {
        value.as_str().to_string()
    }
}

/// Per-model deviations in how a code table is addressed.
///
/// Some remotes only have dry-mode codes recorded at low fan speed. For
/// those models, enable `dry_forces_low_fan` so the resolver looks up
/// `dry.low.<temperature>` whatever fan speed is believed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelQuirks {
    /// Resolve dry mode with the low fan speed.
    #[serde(default)]
    pub dry_forces_low_fan: bool,
}

impl ModelQuirks {
    /// Quirks that force low fan speed in dry mode.
    #[must_use]
    pub const fn dry_low_fan() -> Self {
        Self {
            dry_forces_low_fan: true,
        }
    }
}

/// Tuya local protocol version spoken by the IR blaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProtocolVersion {
    /// Version 3.1.
    V31,
    /// Version 3.2.
    V32,
    /// Version 3.3.
    #[default]
    V33,
}

impl ProtocolVersion {
    /// Returns the version string, e.g. `"3.3"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V31 => "3.1",
            Self::V32 => "3.2",
            Self::V33 => "3.3",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "3.1" => Ok(Self::V31),
            "3.2" => Ok(Self::V32),
            "3.3" => Ok(Self::V33),
            _ => Err(ValueError::InvalidProtocolVersion(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProtocolVersion {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProtocolVersion> for String {
    fn from(value: ProtocolVersion) -> Self {
        value.as_str().to_string()
    }
}
