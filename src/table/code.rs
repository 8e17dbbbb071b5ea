// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infrared codes and the keys that select them.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ValueError;
use crate::types::{FanSpeed, HvacMode, Temperature};

/// A pre-learned infrared signal.
///
/// Code tables store codes as hexadecimal strings; the IR blaster expects
/// the same bytes base64-encoded.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::table::IrCode;
///
/// let code = IrCode::from_hex("AABBCC").unwrap();
/// assert_eq!(code.as_bytes(), &[0xAA, 0xBB, 0xCC]);
/// assert_eq!(code.to_base64(), "qrvM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IrCode(Vec<u8>);

impl IrCode {
    /// Decodes a code from its hexadecimal representation.
    ///
    /// Surrounding whitespace is ignored; upper and lower case digits are
    /// both accepted.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexCode` if the string is empty, has an
    /// odd number of digits or contains a non-hex character.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim();
        if digits.is_empty() || digits.len() % 2 != 0 {
            return Err(ValueError::InvalidHexCode(hex.to_string()));
        }

        let bytes = digits
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| Some((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ValueError::InvalidHexCode(hex.to_string()))?;

        Ok(Self(bytes))
    }

    /// Returns the raw code bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the code encoded as standard base64, as sent to the blaster.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Returns the code as uppercase hexadecimal.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02X}")).collect()
    }
}

// Only ASCII hex digits; `from_str_radix` would also take a sign.
fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for IrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The (mode, fan speed, temperature) triple that selects a code.
///
/// Displays as the dotted table path, e.g. `cool.medium.22`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeKey {
    /// Operating mode.
    pub mode: HvacMode,
    /// Fan speed.
    pub fan_speed: FanSpeed,
    /// Target temperature.
    pub temperature: Temperature,
}

impl CodeKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(mode: HvacMode, fan_speed: FanSpeed, temperature: Temperature) -> Self {
        Self {
            mode,
            fan_speed,
            temperature,
        }
    }
}

impl fmt::Display for CodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.mode.table_key(),
            self.fan_speed.table_key(),
            self.temperature.table_key()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_mixed_case() {
        let code = IrCode::from_hex(" 0aFf10 ").unwrap();
        assert_eq!(code.as_bytes(), &[0x0A, 0xFF, 0x10]);
        assert_eq!(code.to_hex(), "0AFF10");
    }

    #[test]
    fn reject_malformed_hex() {
        for bad in ["", "ABC", "GG00", "zz", "ä0", "+A+B", "-1", "0x0F", "A B "] {
            assert_eq!(
                IrCode::from_hex(bad),
                Err(ValueError::InvalidHexCode(bad.to_string()))
            );
        }
    }

    #[test]
    fn base64_of_raw_bytes() {
        let code = IrCode::from_hex("AABBCC").unwrap();
        assert_eq!(code.to_base64(), "qrvM");

        let code = IrCode::from_hex("00").unwrap();
        assert_eq!(code.to_base64(), "AA==");
    }

    #[test]
    fn key_display_is_table_path() {
        let key = CodeKey::new(
            HvacMode::Auto,
            FanSpeed::Quiet,
            Temperature::new(18).unwrap(),
        );
        assert_eq!(key.to_string(), "auto.quiet.18");
    }
}
