// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-model infrared code table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ResolutionError, TableError, ValueError};
use crate::types::{FanSpeed, HvacMode};

use super::{CodeKey, IrCode};

/// Key of the standalone power-off code.
const OFF_KEY: &str = "off";

/// Alternative spelling of the off key used by older tables.
const LEGACY_OFF_KEY: &str = "power_off";

/// Codes indexed by temperature key.
type TemperatureCodes = BTreeMap<String, IrCode>;

/// Immutable mapping from (mode, fan speed, temperature) to infrared code.
///
/// # File Format
///
/// Tables are JSON documents laid out as
/// `mode -> fan speed -> temperature -> hex code`, plus a standalone
/// `off` code:
///
/// ```json
/// {
///   "off": "A1B2C3",
///   "cool": {
///     "low": { "16": "0011AA", "17": "0011AB" },
///     "medium": { "16": "0012AA" }
///   }
/// }
/// ```
///
/// A fan speed may map directly to a single code instead of a temperature
/// map; that code is then used for every temperature (typical for fan-only
/// mode). Tables wrapped in a SmartIR-style document, with the codes under a
/// `commands` object, are accepted as well.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::table::{CodeKey, CodeTable};
/// use tuya_ir_ac::types::{FanSpeed, HvacMode, Temperature};
///
/// let table = CodeTable::from_json(r#"{
///     "off": "00FF",
///     "cool": { "medium": { "22": "AABBCC" } }
/// }"#).unwrap();
///
/// let key = CodeKey::new(HvacMode::Cool, FanSpeed::Medium, Temperature::new(22).unwrap());
/// assert_eq!(table.lookup(&key).unwrap().to_hex(), "AABBCC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    off: IrCode,
    modes: BTreeMap<String, BTreeMap<String, TemperatureCodes>>,
    /// Codes that apply regardless of temperature, by mode then fan speed.
    fixed: BTreeMap<String, BTreeMap<String, IrCode>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFanEntry {
    Single(String),
    ByTemperature(BTreeMap<String, String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawModeEntry {
    Code(String),
    ByFanSpeed(BTreeMap<String, RawFanEntry>),
}

#[derive(Deserialize)]
struct SmartIrDocument {
    commands: BTreeMap<String, RawModeEntry>,
}

impl CodeTable {
    /// Parses a table from JSON text.
    ///
    /// Every code is decoded while parsing, so a table that loads is
    /// guaranteed to contain only valid codes.
    ///
    /// # Errors
    ///
    /// Returns `TableError` if the JSON is malformed, has no off code, or
    /// contains a code that is not valid hexadecimal.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let raw: BTreeMap<String, RawModeEntry> = if value.get("commands").is_some() {
            serde_json::from_value::<SmartIrDocument>(value)?.commands
        } else {
            serde_json::from_value(value)?
        };
        Self::from_raw(raw)
    }

    /// Reads and parses a table file.
    ///
    /// # Errors
    ///
    /// Returns `TableError::Io` if the file cannot be read, or any error
    /// from [`CodeTable::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn from_raw(mut raw: BTreeMap<String, RawModeEntry>) -> Result<Self, TableError> {
        let off_entry = raw
            .remove(OFF_KEY)
            .or_else(|| raw.remove(LEGACY_OFF_KEY))
            .ok_or(TableError::MissingOffCode)?;
        let RawModeEntry::Code(off_hex) = off_entry else {
            return Err(TableError::MissingOffCode);
        };
        let off = decode(&off_hex, OFF_KEY)?;

        let mut modes = BTreeMap::new();
        let mut fixed = BTreeMap::new();

        for (mode, entry) in raw {
            let fans = match entry {
                RawModeEntry::ByFanSpeed(fans) => fans,
                // Standalone codes such as "power_on" are not addressable by state.
                RawModeEntry::Code(_) => continue,
            };

            let mut by_fan = BTreeMap::new();
            let mut fixed_by_fan = BTreeMap::new();

            for (fan, fan_entry) in fans {
                match fan_entry {
                    RawFanEntry::Single(hex) => {
                        let code = decode(&hex, &format!("{mode}.{fan}"))?;
                        fixed_by_fan.insert(fan, code);
                    }
                    RawFanEntry::ByTemperature(temps) => {
                        let mut codes = TemperatureCodes::new();
                        for (temp, hex) in temps {
                            let code = decode(&hex, &format!("{mode}.{fan}.{temp}"))?;
                            codes.insert(temp, code);
                        }
                        by_fan.insert(fan, codes);
                    }
                }
            }

            if !fixed_by_fan.is_empty() {
                fixed.insert(mode.clone(), fixed_by_fan);
            }
            modes.insert(mode, by_fan);
        }

        Ok(Self { off, modes, fixed })
    }

    /// Returns the standalone power-off code.
    #[must_use]
    pub fn off_code(&self) -> &IrCode {
        &self.off
    }

    /// Looks up the code for a (mode, fan speed, temperature) key.
    ///
    /// No fallback is attempted: a missing temperature is never replaced by
    /// a neighbouring one.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError` naming the requested key if the mode, fan
    /// speed or temperature has no entry.
    pub fn lookup(&self, key: &CodeKey) -> Result<&IrCode, ResolutionError> {
        let mode = key.mode.table_key();
        let fan = key.fan_speed.table_key();

        if let Some(code) = self.fixed.get(mode).and_then(|fans| fans.get(fan)) {
            return Ok(code);
        }

        let fans = self
            .modes
            .get(mode)
            .ok_or(ResolutionError::UnsupportedMode(*key))?;
        let temps = fans
            .get(fan)
            .ok_or(ResolutionError::UnsupportedFanSpeed(*key))?;
        temps
            .get(&key.temperature.table_key())
            .ok_or(ResolutionError::MissingTemperature(*key))
    }

    /// Returns `true` if the table has a code for the key.
    #[must_use]
    pub fn contains(&self, key: &CodeKey) -> bool {
        self.lookup(key).is_ok()
    }

    /// Returns the modes this table has codes for, always including `Off`.
    ///
    /// Table sections whose names are not known modes are skipped.
    #[must_use]
    pub fn supported_modes(&self) -> Vec<HvacMode> {
        HvacMode::ALL
            .into_iter()
            .filter(|mode| mode.is_off() || self.modes.contains_key(mode.table_key()))
            .collect()
    }

    /// Returns the fan speeds available in any mode of this table.
    #[must_use]
    pub fn supported_fan_speeds(&self) -> Vec<FanSpeed> {
        FanSpeed::ALL
            .into_iter()
            .filter(|fan| {
                self.modes.values().any(|fans| fans.contains_key(fan.table_key()))
                    || self.fixed.values().any(|fans| fans.contains_key(fan.table_key()))
            })
            .collect()
    }

    /// Returns the number of state-addressable codes, excluding `off`.
    #[must_use]
    pub fn len(&self) -> usize {
        let by_temperature: usize = self
            .modes
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum();
        let fixed: usize = self.fixed.values().map(BTreeMap::len).sum();
        by_temperature + fixed
    }

    /// Returns `true` if the table only has the off code.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn decode(hex: &str, location: &str) -> Result<IrCode, TableError> {
    IrCode::from_hex(hex).map_err(|source: ValueError| TableError::InvalidCode {
        location: location.to_string(),
        source,
    })
}
