// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result of code resolution.

use std::fmt;

use crate::table::{CodeKey, IrCode};
use crate::transport::LearnedCodePayload;

/// What a resolved code drives the unit to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The standalone power-off code.
    Off,
    /// The code stored under a (mode, fan speed, temperature) key.
    Code(CodeKey),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Code(key) => write!(f, "{key}"),
        }
    }
}

/// A code selected from a table, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'t> {
    target: Target,
    code: &'t IrCode,
    encoded: String,
}

impl<'t> Resolution<'t> {
    pub(crate) fn new(target: Target, code: &'t IrCode) -> Self {
        Self {
            target,
            code,
            encoded: code.to_base64(),
        }
    }

    /// Returns what the code drives the unit to.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the table key, or `None` for the off code.
    #[must_use]
    pub fn key(&self) -> Option<CodeKey> {
        match self.target {
            Target::Off => None,
            Target::Code(key) => Some(key),
        }
    }

    /// Returns `true` if the off code was selected.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.target == Target::Off
    }

    /// Returns the selected code.
    #[must_use]
    pub fn code(&self) -> &'t IrCode {
        self.code
    }

    /// Returns the code as base64 of its raw bytes.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Builds the transport payload for this code.
    #[must_use]
    pub fn payload(&self) -> LearnedCodePayload {
        LearnedCodePayload::new(self.encoded.clone())
    }
}
