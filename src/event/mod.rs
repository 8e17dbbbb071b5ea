// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State-change notifications.
//!
//! Every completed controller command publishes a
//! [`ClimateEvent::StateChanged`] on the controller's [`EventBus`], carrying
//! the believed attribute map. The platform subscribes to refresh the
//! displayed state.
//!
//! # Examples
//!
//! ```
//! use tuya_ir_ac::event::{ClimateEvent, CommandOutcome, DeviceId, EventBus};
//! use tuya_ir_ac::state::DeviceState;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ClimateEvent::StateChanged {
//!     device_id: DeviceId::new("bf0011223344556677"),
//!     attributes: DeviceState::new().attributes(),
//!     outcome: CommandOutcome::Sent,
//! });
//!
//! let event = rx.try_recv().unwrap();
//! assert!(event.is_state_change());
//! ```

mod climate_event;
mod device_id;
mod event_bus;

pub use climate_event::{ClimateEvent, CommandOutcome};
pub use device_id::DeviceId;
pub use event_bus::EventBus;
