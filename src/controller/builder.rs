// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller builder.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::config::DeviceConfig;
use crate::error::Error;
use crate::event::{DeviceId, EventBus};
use crate::state::{DeviceState, StateAttributes};
use crate::table::{CodeTable, TableRegistry};
use crate::transport::Transport;

use super::{AcController, Diagnostics};

/// Builder for [`AcController`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use tuya_ir_ac::config::DeviceConfig;
/// use tuya_ir_ac::controller::AcController;
/// use tuya_ir_ac::event::EventBus;
/// use tuya_ir_ac::state::StateAttributes;
/// use tuya_ir_ac::table::CodeTable;
/// # use tuya_ir_ac::transport::{DeviceHandle, LearnedCodePayload, SendReply, Transport};
/// # use tuya_ir_ac::error::ProtocolError;
/// # #[derive(Debug)]
/// # struct TuyaLink;
/// # impl Transport for TuyaLink {
/// #     async fn send_learned_code(&self, _: &DeviceHandle, _: &LearnedCodePayload)
/// #         -> Result<SendReply, ProtocolError> { Ok(SendReply::ok()) }
/// # }
///
/// let table = Arc::new(CodeTable::from_json(r#"{"off": "00FF"}"#).unwrap());
/// let previous = StateAttributes::from_json(r#"{"is_on": false, "mode": "cool", "temp": 21}"#).unwrap();
///
/// let controller = AcController::builder(
///     DeviceConfig::new("bf0011223344556677", "a1b2c3d4e5f6a7b8", "192.168.1.40"),
///     TuyaLink,
/// )
/// .with_event_bus(EventBus::new())
/// .with_restored_state(previous)
/// .with_send_timeout(Duration::from_secs(5))
/// .build_with_table(table)
/// .unwrap();
///
/// assert_eq!(controller.state().temperature().value(), 21);
/// ```
#[derive(Debug)]
pub struct AcControllerBuilder<T> {
    config: DeviceConfig,
    transport: T,
    events: Option<EventBus>,
    restored: Option<StateAttributes>,
    send_timeout: Option<Duration>,
}

impl<T: Transport> AcControllerBuilder<T> {
    pub(crate) fn new(config: DeviceConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            events: None,
            restored: None,
            send_timeout: None,
        }
    }

    /// Publishes events on a shared bus instead of a private one.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Seeds the believed state from attributes persisted before a restart.
    ///
    /// Missing or invalid values fall back to the defaults.
    #[must_use]
    pub fn with_restored_state(mut self, attributes: StateAttributes) -> Self {
        self.restored = Some(attributes);
        self
    }

    /// Bounds every send; a send that takes longer fails with
    /// `ProtocolError::Timeout`.
    #[must_use]
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }

    /// Builds the controller with the table for the configured model.
    ///
    /// The table is taken from the registry's cache, or loaded into it on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid, or
    /// `Error::Table` if no table can be loaded for the model.
    pub fn build(self, registry: &TableRegistry) -> Result<AcController<T>, Error> {
        self.config.validate()?;
        let table = registry.get(&self.config.model)?;
        self.build_with_table(table)
    }

    /// Builds the controller with an explicit table.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn build_with_table(self, table: Arc<CodeTable>) -> Result<AcController<T>, Error> {
        self.config.validate()?;

        let mut state = DeviceState::new();
        if let Some(attributes) = &self.restored {
            state.restore(attributes);
        }

        let id = DeviceId::new(self.config.device_id.trim());
        let quirks = self.config.quirks();

        tracing::info!(
            device = %id,
            name = %self.config.name,
            model = %self.config.model,
            version = %self.config.version,
            codes = table.len(),
            "Created climate controller"
        );

        Ok(AcController {
            handle: self.config.handle(),
            id,
            config: self.config,
            table,
            quirks,
            transport: self.transport,
            state: tokio::sync::Mutex::new(state),
            snapshot: RwLock::new(state),
            current_temperature: RwLock::new(
                self.restored
                    .and_then(|attributes| attributes.current_temperature)
                    .filter(|value| value.is_finite()),
            ),
            diagnostics: Mutex::new(Diagnostics::default()),
            events: self.events.unwrap_or_default(),
            send_timeout: self.send_timeout,
        })
    }
}
