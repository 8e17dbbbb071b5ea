// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate event types.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::state::StateAttributes;

use super::DeviceId;

/// How a command's transmission ended.
///
/// The believed state is updated before transmission, so the attributes in
/// an event reflect the request whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The code was sent and the blaster reported no error.
    Sent,
    /// The requested combination has no code in the table.
    ResolutionFailed(String),
    /// The transport failed or the blaster reported an error.
    TransmissionFailed(String),
}

impl CommandOutcome {
    /// Derives the outcome from a command result.
    #[must_use]
    pub fn from_result<T>(result: &Result<T, Error>) -> Self {
        match result {
            Ok(_) => Self::Sent,
            Err(Error::Resolution(e)) => Self::ResolutionFailed(e.to_string()),
            Err(e) => Self::TransmissionFailed(e.to_string()),
        }
    }

    /// Returns `true` if the code was sent successfully.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Returns the error message, if the command failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Sent => None,
            Self::ResolutionFailed(e) | Self::TransmissionFailed(e) => Some(e),
        }
    }
}

/// Events emitted by an air conditioner controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClimateEvent {
    /// A command updated the believed state and attempted a transmission.
    StateChanged {
        /// The device the command targeted.
        device_id: DeviceId,
        /// The believed state after the command.
        attributes: StateAttributes,
        /// How the transmission ended.
        outcome: CommandOutcome,
    },

    /// The believed state was seeded from persisted attributes.
    ///
    /// Nothing is transmitted on restore.
    Restored {
        /// The restored device.
        device_id: DeviceId,
        /// The believed state after restore.
        attributes: StateAttributes,
    },

    /// The external sensor reported a new room temperature.
    CurrentTemperatureChanged {
        /// The device the sensor belongs to.
        device_id: DeviceId,
        /// The new reading, or `None` if the sensor became unavailable.
        current_temperature: Option<f64>,
    },
}

impl ClimateEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::StateChanged { device_id, .. }
            | Self::Restored { device_id, .. }
            | Self::CurrentTemperatureChanged { device_id, .. } => device_id,
        }
    }

    /// Returns `true` if this event follows a command.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns the attribute map carried by the event, if any.
    #[must_use]
    pub fn attributes(&self) -> Option<&StateAttributes> {
        match self {
            Self::StateChanged { attributes, .. } | Self::Restored { attributes, .. } => {
                Some(attributes)
            }
            Self::CurrentTemperatureChanged { .. } => None,
        }
    }
}
