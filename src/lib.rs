// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `tuya_ir_ac` - drive infrared-controlled air conditioners through Tuya
//! IR blasters.
//!
//! Air conditioners with an infrared remote cannot report their state. This
//! library keeps a *believed* state for each unit and, for every thermostat
//! command, sends the pre-learned infrared code that matches the resulting
//! (mode, fan speed, temperature) combination.
//!
//! # Supported Features
//!
//! - **Commands**: turn on/off, target temperature, HVAC mode, fan speed
//! - **Code tables**: per-model JSON tables, cached process-wide
//! - **Serialization**: one transmission in flight per device, in order
//! - **Restore**: seed the believed state from persisted attributes
//! - **Events**: state-change notifications over a broadcast bus
//!
//! # Supported Models
//!
//! - Mitsubishi MSZ-GE25VA
//! - Mitsubishi MSC-GE35VB
//! - Any other model with a code table file of the same name
//!
//! # Quick Start
//!
//! The network session with the blaster is provided by the caller as a
//! [`Transport`](transport::Transport):
//!
//! ```no_run
//! use tuya_ir_ac::{AcController, DeviceConfig, HvacMode, TableRegistry, Temperature};
//! # use tuya_ir_ac::transport::{DeviceHandle, LearnedCodePayload, SendReply, Transport};
//! # use tuya_ir_ac::ProtocolError;
//! # #[derive(Debug)]
//! # struct TuyaLink;
//! # impl Transport for TuyaLink {
//! #     async fn send_learned_code(&self, _: &DeviceHandle, _: &LearnedCodePayload)
//! #         -> Result<SendReply, ProtocolError> { Ok(SendReply::ok()) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> tuya_ir_ac::Result<()> {
//!     let registry = TableRegistry::with_directory("codes");
//!     let config = DeviceConfig::from_json(r#"{
//!         "ac_name": "Bedroom",
//!         "device_id": "bf0011223344556677",
//!         "device_local_key": "a1b2c3d4e5f6a7b8",
//!         "device_ip": "192.168.1.40",
//!         "device_model": "MSZ-GE25VA"
//!     }"#)?;
//!
//!     let controller = AcController::builder(config, TuyaLink).build(&registry)?;
//!     let mut events = controller.events().subscribe();
//!
//!     controller.set_hvac_mode(HvacMode::Cool).await?;
//!     controller.set_temperature(Temperature::new(22)?).await?;
//!
//!     if let Ok(event) = events.try_recv() {
//!         println!("{:?}", event.attributes());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Invalid values are rejected with [`ValueError`] before anything changes.
//! Once a command is accepted the believed state is updated, and a missing
//! table entry ([`ResolutionError`]) or a failed send ([`ProtocolError`]) is
//! reported without rolling the state back.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod resolver;
pub mod state;
pub mod table;
pub mod transport;
pub mod types;

pub use config::{DeviceConfig, DeviceModel, ModelQuirks, ProtocolVersion};
pub use controller::{AcController, AcControllerBuilder, Diagnostics};
pub use error::{
    ConfigError, Error, ProtocolError, ResolutionError, Result, TableError, ValueError,
};
pub use event::{ClimateEvent, CommandOutcome, DeviceId, EventBus};
pub use resolver::{Resolution, Target, resolve};
pub use state::{DeviceState, StateAttributes, StateChange};
pub use table::{CodeKey, CodeTable, IrCode, TableRegistry};
pub use transport::{DeviceHandle, LearnedCodePayload, SendReply, Transport};
pub use types::{FanSpeed, HvacMode, PowerState, Temperature};
