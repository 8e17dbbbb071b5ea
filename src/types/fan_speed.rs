// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Fan speed of the indoor unit.
///
/// Code tables index their entries by the lowercase name returned from
/// [`FanSpeed::table_key`].
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::types::FanSpeed;
///
/// let speed: FanSpeed = "quiet".parse().unwrap();
/// assert_eq!(speed, FanSpeed::Quiet);
/// assert_eq!(FanSpeed::default(), FanSpeed::Medium);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FanSpeed {
    /// Unit picks the speed.
    Auto,
    /// Quietest setting.
    Quiet,
    /// Low.
    Low,
    /// Medium.
    #[default]
    Medium,
    /// High.
    High,
    /// Highest.
    Highest,
}

impl FanSpeed {
    /// All fan speeds, slowest named speed first after `Auto`.
    pub const ALL: [Self; 6] = [
        Self::Auto,
        Self::Quiet,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Highest,
    ];

    /// Returns the canonical name of this fan speed.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Quiet => "quiet",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Highest => "highest",
        }
    }

    /// Returns the key this speed is stored under in a code table.
    #[must_use]
    pub const fn table_key(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "quiet" => Ok(Self::Quiet),
            "low" => Ok(Self::Low),
            "medium" | "mid" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "highest" => Ok(Self::Highest),
            _ => Err(ValueError::InvalidFanSpeed(s.to_string())),
        }
    }
}

impl TryFrom<&str> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
