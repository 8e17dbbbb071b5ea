// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Believed device state.
//!
//! The [`DeviceState`] struct is the state holder for one air conditioner:
//! it validates every field before accepting it. [`StateChange`] represents
//! validated mutations applied by the controller, and [`StateAttributes`] is
//! the flat map exchanged with the platform for display and restore.
//!
//! # Examples
//!
//! ```
//! use tuya_ir_ac::state::{DeviceState, StateChange};
//! use tuya_ir_ac::types::PowerState;
//!
//! let mut state = DeviceState::new();
//! state.apply(&StateChange::power_on());
//!
//! assert_eq!(state.power(), PowerState::On);
//! ```

mod attributes;
mod device_state;
mod state_change;

pub use attributes::StateAttributes;
pub use device_state::DeviceState;
pub use state_change::StateChange;
