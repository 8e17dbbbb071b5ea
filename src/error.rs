// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `tuya_ir_ac` library.
//!
//! This module provides the error hierarchy for every failure the library can
//! report: input validation, code resolution, code table loading, transport
//! communication, and device configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::table::CodeKey;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested value was rejected by validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The active code table has no code for the requested state.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// The transport failed to deliver the infrared code.
    #[error("transmission error: {0}")]
    Transmission(#[from] ProtocolError),

    /// A code table could not be loaded.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// The device configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation.
///
/// These are raised synchronously when a caller supplies a mode, fan speed
/// or temperature outside its domain. They are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The HVAC mode is not one of off, cool, heat, dry, fan or auto.
    #[error("mode must be one of off, cool, heat, dry, fan or auto, got {0}")]
    InvalidMode(String),

    /// The fan speed is not one of auto, quiet, low, medium, high or highest.
    #[error("fan speed must be one of auto, quiet, low, medium, high or highest, got {0}")]
    InvalidFanSpeed(String),

    /// The target temperature is outside the supported range.
    #[error("temperature {actual} is out of range [{min}, {max}]")]
    InvalidTemperature {
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
        /// The value that was provided, as given by the caller.
        actual: String,
    },

    /// The power state string is not recognized.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// The protocol version is not supported by Tuya IR blasters.
    #[error("protocol version must be one of 3.1, 3.2 or 3.3, got {0}")]
    InvalidProtocolVersion(String),

    /// The device address is not a valid IP address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// A model name cannot be used as a code table file name.
    #[error("invalid model name: {0}")]
    InvalidModel(String),

    /// An infrared code is not a valid hexadecimal string.
    #[error("invalid hexadecimal infrared code: {0}")]
    InvalidHexCode(String),
}

/// Errors raised when the active code table has no entry for a state.
///
/// Each variant carries the exact (mode, fan speed, temperature) key that
/// was requested.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The table has no section for this mode.
    #[error("code table has no mode {mode}, requested {key}", mode = .0.mode, key = .0)]
    UnsupportedMode(CodeKey),

    /// The mode section has no entries for this fan speed.
    #[error(
        "code table has no fan speed {fan} for mode {mode}, requested {key}",
        fan = .0.fan_speed,
        mode = .0.mode,
        key = .0
    )]
    UnsupportedFanSpeed(CodeKey),

    /// The fan speed section has no code for this temperature.
    #[error(
        "code table has no code for temperature {temperature}, requested {key}",
        temperature = .0.temperature,
        key = .0
    )]
    MissingTemperature(CodeKey),
}

impl ResolutionError {
    /// Returns the requested key that could not be resolved.
    #[must_use]
    pub fn key(&self) -> &CodeKey {
        match self {
            Self::UnsupportedMode(key)
            | Self::UnsupportedFanSpeed(key)
            | Self::MissingTemperature(key) => key,
        }
    }
}

/// Errors related to loading code tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// Reading the table file failed.
    #[error("failed to read code table {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table is not valid JSON or does not have the expected shape.
    #[error("malformed code table: {0}")]
    Json(#[from] serde_json::Error),

    /// The table has no standalone `off` code.
    #[error("code table has no off code")]
    MissingOffCode,

    /// A code in the table is not valid hexadecimal.
    #[error("invalid code at {location}: {source}")]
    InvalidCode {
        /// Dotted path of the offending entry, e.g. `cool.low.22`.
        location: String,
        /// The validation failure.
        #[source]
        source: ValueError,
    },

    /// No table source is known for the requested model.
    #[error("no code table available for model {0}")]
    UnknownModel(String),
}

/// Errors related to transport communication with the IR blaster.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The device returned a non-empty error result.
    #[error("device reported failure: {0}")]
    DeviceReported(String),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The send timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to device configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config entry is not valid JSON or a key has the wrong form.
    #[error("malformed config entry: {0}")]
    Malformed(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value.
    #[error("invalid value for {field}: {source}")]
    InvalidField {
        /// The field name.
        field: &'static str,
        /// The validation failure.
        #[source]
        source: ValueError,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
