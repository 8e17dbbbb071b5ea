// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat commands for one infrared-controlled air conditioner.
//!
//! An [`AcController`] owns the believed [`DeviceState`] of one unit. Every
//! command runs one critical section under the device lock:
//!
//! 1. apply the requested change to the believed state,
//! 2. resolve the code for the resulting state,
//! 3. send it through the [`Transport`],
//! 4. publish a [`ClimateEvent::StateChanged`].
//!
//! At most one transmission per device is in flight, and sends happen in
//! lock-acquisition order. The believed state is optimistic: it is never
//! rolled back when resolution or transmission fails.
//!
//! # Examples
//!
//! ```no_run
//! use tuya_ir_ac::config::DeviceConfig;
//! use tuya_ir_ac::controller::AcController;
//! use tuya_ir_ac::table::TableRegistry;
//! use tuya_ir_ac::types::{HvacMode, Temperature};
//! # use tuya_ir_ac::transport::{DeviceHandle, LearnedCodePayload, SendReply, Transport};
//! # use tuya_ir_ac::error::ProtocolError;
//! # #[derive(Debug)]
//! # struct TuyaLink;
//! # impl Transport for TuyaLink {
//! #     async fn send_learned_code(&self, _: &DeviceHandle, _: &LearnedCodePayload)
//! #         -> Result<SendReply, ProtocolError> { Ok(SendReply::ok()) }
//! # }
//!
//! # async fn example() -> tuya_ir_ac::Result<()> {
//! let registry = TableRegistry::with_directory("/etc/tuya_ir_ac/codes");
//! let config = DeviceConfig::new("bf0011223344556677", "a1b2c3d4e5f6a7b8", "192.168.1.40");
//!
//! let controller = AcController::builder(config, TuyaLink).build(&registry)?;
//!
//! controller.set_hvac_mode(HvacMode::Cool).await?;
//! controller.set_temperature(Temperature::new(22)?).await?;
//! controller.turn_off().await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod diagnostics;

pub use builder::AcControllerBuilder;
pub use diagnostics::Diagnostics;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::config::{DeviceConfig, ModelQuirks};
use crate::error::{Error, ProtocolError};
use crate::event::{ClimateEvent, CommandOutcome, DeviceId, EventBus};
use crate::resolver::{self, Target};
use crate::state::{DeviceState, StateAttributes, StateChange};
use crate::table::CodeTable;
use crate::transport::{DeviceHandle, Transport};
use crate::types::{FanSpeed, HvacMode, Temperature};

/// Controller for one air conditioner behind a Tuya IR blaster.
///
/// Created through [`AcController::builder`].
#[derive(Debug)]
pub struct AcController<T: Transport> {
    id: DeviceId,
    config: DeviceConfig,
    handle: DeviceHandle,
    table: Arc<CodeTable>,
    quirks: ModelQuirks,
    transport: T,
    /// Held for the whole apply, resolve and send sequence.
    state: tokio::sync::Mutex<DeviceState>,
    /// Copy of the believed state for synchronous readers.
    snapshot: RwLock<DeviceState>,
    current_temperature: RwLock<Option<f64>>,
    diagnostics: Mutex<Diagnostics>,
    events: EventBus,
    send_timeout: Option<Duration>,
}

impl<T: Transport> AcController<T> {
    /// Starts building a controller for a configured device.
    #[must_use]
    pub fn builder(config: DeviceConfig, transport: T) -> AcControllerBuilder<T> {
        AcControllerBuilder::new(config, transport)
    }

    // ========== Identity ==========

    /// Returns the device id used in events.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the configured display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the platform unique id, `climate <name>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        self.config.unique_id()
    }

    /// Returns the device configuration.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Returns the transport handle for the blaster.
    #[must_use]
    pub fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    /// Returns the active code table.
    #[must_use]
    pub fn table(&self) -> &Arc<CodeTable> {
        &self.table
    }

    /// Returns the event bus this controller publishes on.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ========== State ==========

    /// Returns a snapshot of the believed state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        *self.snapshot.read()
    }

    /// Returns the attribute map published to the platform.
    ///
    /// Includes the external sensor reading when one is known.
    #[must_use]
    pub fn attributes(&self) -> StateAttributes {
        self.attributes_of(&self.state())
    }

    /// Returns the latest external sensor reading.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        *self.current_temperature.read()
    }

    /// Records a reading from the external temperature sensor.
    ///
    /// Non-finite readings are treated as the sensor being unavailable.
    pub fn set_current_temperature(&self, reading: Option<f64>) {
        let reading = reading.filter(|value| value.is_finite());
        {
            let mut current = self.current_temperature.write();
            if *current == reading {
                return;
            }
            *current = reading;
        }
        self.events.publish(ClimateEvent::CurrentTemperatureChanged {
            device_id: self.id.clone(),
            current_temperature: reading,
        });
    }

    /// Seeds the believed state from attributes persisted before a restart.
    ///
    /// Missing or invalid values fall back to the defaults. Nothing is
    /// transmitted.
    pub async fn restore(&self, attributes: &StateAttributes) {
        let mut state = self.state.lock().await;
        state.restore(attributes);
        *self.snapshot.write() = *state;

        tracing::info!(
            device = %self.id,
            power = %state.power(),
            mode = %state.mode(),
            fan_speed = %state.fan_speed(),
            temperature = %state.temperature(),
            "Restored believed state"
        );

        self.events.publish(ClimateEvent::Restored {
            device_id: self.id.clone(),
            attributes: self.attributes_of(&state),
        });
    }

    /// Returns the transmission counters.
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics.lock().clone()
    }

    // ========== Supported Values ==========

    /// Returns the HVAC modes the code table supports, always including off.
    #[must_use]
    pub fn supported_hvac_modes(&self) -> Vec<HvacMode> {
        self.table.supported_modes()
    }

    /// Returns the fan speeds the code table supports.
    #[must_use]
    pub fn supported_fan_modes(&self) -> Vec<FanSpeed> {
        self.table.supported_fan_speeds()
    }

    /// Returns the lowest settable temperature.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn min_temp(&self) -> u8 {
        Temperature::MIN
    }

    /// Returns the highest settable temperature.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn max_temp(&self) -> u8 {
        Temperature::MAX
    }

    /// Returns the temperature step.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn target_temperature_step(&self) -> u8 {
        Temperature::STEP
    }

    // ========== Commands ==========

    /// Turns the unit on with the believed mode, fan speed and temperature.
    ///
    /// If the believed mode is off, the unit is turned on in auto mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolution` if the table has no code for the state,
    /// or `Error::Transmission` if sending fails. The state stays updated.
    pub async fn turn_on(&self) -> Result<(), Error> {
        self.dispatch(|state| {
            if state.mode().is_off() {
                StateChange::batch(vec![
                    StateChange::power_on(),
                    StateChange::mode(HvacMode::Auto),
                ])
            } else {
                StateChange::power_on()
            }
        })
        .await
    }

    /// Turns the unit off, keeping the believed mode, fan speed and
    /// temperature for the next [`turn_on`](Self::turn_on).
    ///
    /// # Errors
    ///
    /// Returns `Error::Transmission` if sending the off code fails.
    pub async fn turn_off(&self) -> Result<(), Error> {
        self.dispatch(|_| StateChange::power_off()).await
    }

    /// Sets the target temperature and turns the unit on.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolution` if the table has no code for the state,
    /// or `Error::Transmission` if sending fails. The state stays updated.
    pub async fn set_temperature(&self, temperature: Temperature) -> Result<(), Error> {
        self.dispatch(|_| {
            StateChange::batch(vec![
                StateChange::temperature(temperature),
                StateChange::power_on(),
            ])
        })
        .await
    }

    /// Sets the HVAC mode.
    ///
    /// Mode off turns the unit off; any other mode turns it on.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolution` if the table has no code for the state,
    /// or `Error::Transmission` if sending fails. The state stays updated.
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<(), Error> {
        self.dispatch(|_| {
            let power = if mode.is_off() {
                StateChange::power_off()
            } else {
                StateChange::power_on()
            };
            StateChange::batch(vec![StateChange::mode(mode), power])
        })
        .await
    }

    /// Sets the fan speed and turns the unit on.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolution` if the table has no code for the state,
    /// or `Error::Transmission` if sending fails. The state stays updated.
    pub async fn set_fan_mode(&self, fan_speed: FanSpeed) -> Result<(), Error> {
        self.dispatch(|_| {
            StateChange::batch(vec![
                StateChange::fan_speed(fan_speed),
                StateChange::power_on(),
            ])
        })
        .await
    }

    /// Validates a raw temperature and sets it.
    ///
    /// Fractional values are truncated to whole degrees.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` without touching the state or sending anything
    /// if the value is outside [16, 31]; otherwise as
    /// [`set_temperature`](Self::set_temperature).
    pub async fn set_temperature_value(&self, value: f64) -> Result<(), Error> {
        let temperature = Temperature::try_from(value)?;
        self.set_temperature(temperature).await
    }

    /// Validates a raw mode name and sets it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` without touching the state or sending anything
    /// if the name is not a known mode; otherwise as
    /// [`set_hvac_mode`](Self::set_hvac_mode).
    pub async fn set_hvac_mode_value(&self, value: &str) -> Result<(), Error> {
        let mode: HvacMode = value.parse()?;
        self.set_hvac_mode(mode).await
    }

    /// Validates a raw fan speed name and sets it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` without touching the state or sending anything
    /// if the name is not a known fan speed; otherwise as
    /// [`set_fan_mode`](Self::set_fan_mode).
    pub async fn set_fan_mode_value(&self, value: &str) -> Result<(), Error> {
        let fan_speed: FanSpeed = value.parse()?;
        self.set_fan_mode(fan_speed).await
    }

    // ========== Dispatch ==========

    /// Runs one apply, resolve, send and publish sequence under the lock.
    async fn dispatch<F>(&self, change: F) -> Result<(), Error>
    where
        F: FnOnce(&DeviceState) -> StateChange,
    {
        let mut state = self.state.lock().await;

        let current = *state;
        let change = change(&current);
        let changed = state.apply(&change);
        *self.snapshot.write() = *state;

        tracing::debug!(
            device = %self.id,
            changes = change.change_count(),
            changed,
            "Applied state change"
        );

        let result = self.transmit(&state).await;

        {
            let mut diagnostics = self.diagnostics.lock();
            match &result {
                Ok(target) => diagnostics.record_sent(target.to_string()),
                Err(e) => diagnostics.record_failure(e.to_string()),
            }
        }

        self.events.publish(ClimateEvent::StateChanged {
            device_id: self.id.clone(),
            attributes: self.attributes_of(&state),
            outcome: CommandOutcome::from_result(&result),
        });

        result.map(|_| ())
    }

    /// Resolves and sends the code for a state.
    async fn transmit(&self, state: &DeviceState) -> Result<Target, Error> {
        let resolution = resolver::resolve(state, &self.table, self.quirks).inspect_err(|e| {
            tracing::error!(
                device = %self.id,
                key = %e.key(),
                error = %e,
                "No infrared code for requested state"
            );
        })?;

        let payload = resolution.payload();
        tracing::debug!(
            device = %self.id,
            target = %resolution.target(),
            code = payload.code(),
            "Sending infrared code"
        );

        let send = self.transport.send_learned_code(&self.handle, &payload);
        let reply = match self.send_timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| ProtocolError::Timeout(millis(limit)))?,
            None => send.await,
        };

        reply
            .and_then(crate::transport::SendReply::into_result)
            .inspect_err(|e| {
                tracing::error!(
                    device = %self.id,
                    target = %resolution.target(),
                    error = %e,
                    "Failed to send infrared code"
                );
            })?;

        Ok(resolution.target())
    }

    fn attributes_of(&self, state: &DeviceState) -> StateAttributes {
        let mut attributes = state.attributes();
        attributes.current_temperature = *self.current_temperature.read();
        attributes
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
