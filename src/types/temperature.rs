// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature type.
//!
//! Code tables only hold whole-degree entries. Fractional requests are
//! range-checked as given, then truncated toward zero.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Target temperature in whole degrees Celsius (16-31).
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::types::Temperature;
///
/// let t = Temperature::new(22).unwrap();
/// assert_eq!(t.value(), 22);
///
/// // Fractional values are truncated
/// let t = Temperature::try_from(22.7_f64).unwrap();
/// assert_eq!(t.value(), 22);
///
/// assert!(Temperature::new(40).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Temperature(u8);

impl Temperature {
    /// Lowest accepted temperature.
    pub const MIN: u8 = 16;

    /// Highest accepted temperature.
    pub const MAX: u8 = 31;

    /// Step between selectable temperatures.
    pub const STEP: u8 = 1;

    /// Temperature used when nothing else is known.
    pub const DEFAULT: Self = Self(25);

    /// Creates a temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidTemperature` if value is outside [16, 31].
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Self::out_of_range(value));
        }
        Ok(Self(value))
    }

    /// Returns the temperature in degrees.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the key this temperature is stored under in a code table.
    #[must_use]
    pub fn table_key(&self) -> String {
        self.0.to_string()
    }

    fn out_of_range(actual: impl fmt::Display) -> ValueError {
        ValueError::InvalidTemperature {
            min: Self::MIN,
            max: Self::MAX,
            actual: actual.to_string(),
        }
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Temperature {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Temperature {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| Self::out_of_range(value))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = ValueError;

    // Range is checked on the raw value; the cast cannot overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return Err(Self::out_of_range(value));
        }
        Ok(Self(value.trunc() as u8))
    }
}

impl From<Temperature> for u8 {
    fn from(value: Temperature) -> Self {
        value.0
    }
}

impl FromStr for Temperature {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| Self::out_of_range(s))?;
        Self::try_from(value)
    }
}
