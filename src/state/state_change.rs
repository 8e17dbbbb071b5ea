// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are already-validated mutations of a
//! [`DeviceState`](super::DeviceState). Every controller command is expressed
//! as a change (or a batch of them) that is applied inside the device lock
//! before the resulting state is transmitted.
//!
//! # Examples
//!
//! ```
//! use tuya_ir_ac::state::{DeviceState, StateChange};
//! use tuya_ir_ac::types::HvacMode;
//!
//! let mut state = DeviceState::new();
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::mode(HvacMode::Cool)));
//!
//! // Applying same change again returns false
//! assert!(!state.apply(&StateChange::mode(HvacMode::Cool)));
//! ```

use crate::types::{FanSpeed, HvacMode, PowerState, Temperature};

/// Represents a change in believed device state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// Power switched on or off.
    Power(PowerState),

    /// Operating mode changed.
    Mode(HvacMode),

    /// Fan speed changed.
    FanSpeed(FanSpeed),

    /// Target temperature changed.
    Temperature(Temperature),

    /// Multiple changes at once.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a power-on change.
    #[must_use]
    pub fn power_on() -> Self {
        Self::Power(PowerState::On)
    }

    /// Creates a power-off change.
    #[must_use]
    pub fn power_off() -> Self {
        Self::Power(PowerState::Off)
    }

    /// Creates a mode change.
    #[must_use]
    pub fn mode(mode: HvacMode) -> Self {
        Self::Mode(mode)
    }

    /// Creates a fan speed change.
    #[must_use]
    pub fn fan_speed(speed: FanSpeed) -> Self {
        Self::FanSpeed(speed)
    }

    /// Creates a temperature change.
    #[must_use]
    pub fn temperature(temperature: Temperature) -> Self {
        Self::Temperature(temperature)
    }

    /// Creates a batch of changes.
    #[must_use]
    pub fn batch(changes: Vec<StateChange>) -> Self {
        Self::Batch(changes)
    }

    /// Returns `true` if this is a power change.
    #[must_use]
    pub fn is_power(&self) -> bool {
        matches!(self, Self::Power(_))
    }

    /// Returns the number of individual changes.
    ///
    /// For batch changes, returns the total count of nested changes.
    #[must_use]
    pub fn change_count(&self) -> usize {
        match self {
            Self::Batch(changes) => changes.iter().map(Self::change_count).sum(),
            _ => 1,
        }
    }
}
