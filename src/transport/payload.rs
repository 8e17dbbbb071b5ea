// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire payload for learned infrared codes and the blaster's reply.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Data point value that puts the blaster in learned-code mode.
pub const STUDY_KEY: &str = "study_key";

/// Data-point map that makes the blaster emit a learned code.
///
/// Serializes as `{"1": "study_key", "7": "<base64 code>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedCodePayload {
    #[serde(rename = "1")]
    control: String,
    #[serde(rename = "7")]
    code: String,
}

impl LearnedCodePayload {
    /// Creates a payload for a base64-encoded code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            control: STUDY_KEY.to_string(),
            code: code.into(),
        }
    }

    /// Returns the control data point value.
    #[must_use]
    pub fn control(&self) -> &str {
        &self.control
    }

    /// Returns the base64-encoded code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Serializes the payload to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Returns the payload as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Json` if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value, ProtocolError> {
        serde_json::to_value(self).map_err(Into::into)
    }
}

/// Reply from the blaster to a data-point update.
///
/// A successful update produces no result. Any result the device returns,
/// such as `{"Error": "..."}`, is a reported failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendReply {
    result: Option<serde_json::Value>,
}

impl SendReply {
    /// A reply with no result.
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// Wraps the raw result returned by the device.
    ///
    /// JSON `null` counts as no result.
    #[must_use]
    pub fn from_result(result: Option<serde_json::Value>) -> Self {
        Self {
            result: result.filter(|value| !value.is_null()),
        }
    }

    /// Returns the device's result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&serde_json::Value> {
        self.result.as_ref()
    }

    /// Returns `true` if the device reported no result.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_none()
    }

    /// Converts the reply into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::DeviceReported` with the rendered result if
    /// the device returned one.
    pub fn into_result(self) -> Result<(), ProtocolError> {
        match self.result {
            None => Ok(()),
            Some(serde_json::Value::String(message)) => Err(ProtocolError::DeviceReported(message)),
            Some(other) => Err(ProtocolError::DeviceReported(other.to_string())),
        }
    }
}
