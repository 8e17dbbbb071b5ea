// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Believed air conditioner state.

use crate::error::ValueError;
use crate::types::{FanSpeed, HvacMode, PowerState, Temperature};

use super::{StateAttributes, StateChange};

/// Believed configuration of an infrared-controlled air conditioner.
///
/// IR units have no feedback channel, so this is the software's optimistic
/// record of what was last requested. Every field is always inside its
/// domain: the validating setters reject bad input and leave the previous
/// value in place.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::state::DeviceState;
/// use tuya_ir_ac::types::HvacMode;
///
/// let mut state = DeviceState::new();
/// state.set_mode("cool").unwrap();
/// assert_eq!(state.mode(), HvacMode::Cool);
///
/// // Invalid input is rejected and the old value kept
/// assert!(state.set_temperature(40.0).is_err());
/// assert_eq!(state.temperature().value(), 25);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceState {
    power: PowerState,
    mode: HvacMode,
    fan_speed: FanSpeed,
    temperature: Temperature,
}

impl DeviceState {
    /// Creates a state with the defaults: off, mode off, medium fan, 25 degrees.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the believed power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns `true` if the unit is believed to be on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Returns the believed mode.
    #[must_use]
    pub fn mode(&self) -> HvacMode {
        self.mode
    }

    /// Returns the believed fan speed.
    #[must_use]
    pub fn fan_speed(&self) -> FanSpeed {
        self.fan_speed
    }

    /// Returns the believed target temperature.
    #[must_use]
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Returns `true` if the unit should receive the off code.
    #[must_use]
    pub fn is_effectively_off(&self) -> bool {
        !self.is_on() || self.mode.is_off()
    }

    /// Sets the power state.
    pub fn set_power(&mut self, power: PowerState) {
        self.power = power;
    }

    /// Validates and sets the mode.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMode` if the value is not one of off,
    /// cool, heat, dry, fan or auto. The previous mode is kept.
    pub fn set_mode(&mut self, value: &str) -> Result<HvacMode, ValueError> {
        let mode: HvacMode = value.parse()?;
        self.mode = mode;
        Ok(mode)
    }

    /// Validates and sets the fan speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFanSpeed` if the value is not a known
    /// fan speed. The previous speed is kept.
    pub fn set_fan_speed(&mut self, value: &str) -> Result<FanSpeed, ValueError> {
        let speed: FanSpeed = value.parse()?;
        self.fan_speed = speed;
        Ok(speed)
    }

    /// Validates and sets the target temperature, truncating to whole degrees.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidTemperature` if the value is outside
    /// [16, 31]. The previous temperature is kept.
    pub fn set_temperature(&mut self, value: f64) -> Result<Temperature, ValueError> {
        let temperature = Temperature::try_from(value)?;
        self.temperature = temperature;
        Ok(temperature)
    }

    /// Seeds the state from persisted values after a restart.
    ///
    /// Missing values fall back to the defaults (`off`, 25, `medium`).
    /// Persisted values that no longer validate also fall back to the
    /// default, with a warning, so that a stale record never prevents the
    /// device from starting.
    pub fn initialize_from(
        &mut self,
        mode: Option<&str>,
        temperature: Option<f64>,
        fan_speed: Option<&str>,
    ) {
        self.mode = restore_or_default(mode.map(str::parse::<HvacMode>), "mode");
        self.temperature = restore_or_default(temperature.map(Temperature::try_from), "temperature");
        self.fan_speed = restore_or_default(fan_speed.map(str::parse::<FanSpeed>), "fan_speed");
    }

    /// Seeds the state, including power, from a restored attribute map.
    pub fn restore(&mut self, attributes: &StateAttributes) {
        self.initialize_from(
            attributes.mode.as_deref(),
            attributes.temp,
            attributes.fan_speed.as_deref(),
        );
        self.power = attributes.is_on.unwrap_or_default().into();
    }

    /// Returns the attribute map published to the platform and persisted
    /// for restore.
    #[must_use]
    pub fn attributes(&self) -> StateAttributes {
        StateAttributes {
            is_on: Some(self.is_on()),
            mode: Some(self.mode.as_str().to_string()),
            fan_speed: Some(self.fan_speed.as_str().to_string()),
            temp: Some(f64::from(self.temperature.value())),
            current_temperature: None,
        }
    }

    /// Applies a state change and returns whether the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(power) => replace(&mut self.power, *power),
            StateChange::Mode(mode) => replace(&mut self.mode, *mode),
            StateChange::FanSpeed(speed) => replace(&mut self.fan_speed, *speed),
            StateChange::Temperature(temperature) => {
                replace(&mut self.temperature, *temperature)
            }
            StateChange::Batch(changes) => {
                let mut any_changed = false;
                for c in changes {
                    if self.apply(c) {
                        any_changed = true;
                    }
                }
                any_changed
            }
        }
    }
}

fn replace<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        false
    } else {
        *field = value;
        true
    }
}

fn restore_or_default<T: Default>(value: Option<Result<T, ValueError>>, field: &str) -> T {
    match value {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            tracing::warn!(field, error = %e, "Ignoring invalid restored value");
            T::default()
        }
        None => T::default(),
    }
}
