// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC operating mode.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode of the air conditioner.
///
/// Home-automation platforms spell some modes differently (`heat_cool` for
/// automatic, `fan_only` for ventilation). Those spellings are normalized
/// when parsing so that exactly one variant exists per physical mode.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::types::HvacMode;
///
/// let auto: HvacMode = "heat_cool".parse().unwrap();
/// assert_eq!(auto, HvacMode::Auto);
/// assert_eq!(auto.table_key(), "auto");
///
/// assert!("turbo".parse::<HvacMode>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// The unit is switched off.
    #[default]
    Off,
    /// Cooling.
    Cool,
    /// Heating.
    Heat,
    /// Dehumidifying.
    Dry,
    /// Ventilation only.
    #[serde(alias = "fan_only")]
    Fan,
    /// Automatic heat/cool selection.
    #[serde(alias = "heat_cool")]
    Auto,
}

impl HvacMode {
    /// All modes, in the order they are offered to users.
    pub const ALL: [Self; 6] = [
        Self::Off,
        Self::Cool,
        Self::Heat,
        Self::Dry,
        Self::Fan,
        Self::Auto,
    ];

    /// Returns the canonical name of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Cool => "cool",
            Self::Heat => "heat",
            Self::Dry => "dry",
            Self::Fan => "fan",
            Self::Auto => "auto",
        }
    }

    /// Returns the key this mode is stored under in a code table.
    #[must_use]
    pub const fn table_key(&self) -> &'static str {
        self.as_str()
    }

    /// Returns `true` for [`HvacMode::Off`].
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "cool" => Ok(Self::Cool),
            "heat" => Ok(Self::Heat),
            "dry" => Ok(Self::Dry),
            "fan" | "fan_only" => Ok(Self::Fan),
            "auto" | "heat_cool" => Ok(Self::Auto),
            _ => Err(ValueError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<&str> for HvacMode {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
