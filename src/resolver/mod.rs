// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection of the infrared code for a believed state.
//!
//! [`resolve`] is a pure function of the state, the code table and the model
//! quirks: identical inputs always select the same code. It never touches
//! the transport; the controller sends the resulting payload.
//!
//! # Examples
//!
//! ```
//! use tuya_ir_ac::config::ModelQuirks;
//! use tuya_ir_ac::resolver::resolve;
//! use tuya_ir_ac::state::{DeviceState, StateChange};
//! use tuya_ir_ac::table::CodeTable;
//! use tuya_ir_ac::types::{FanSpeed, HvacMode, Temperature};
//!
//! let table = CodeTable::from_json(r#"{
//!     "off": "00FF",
//!     "cool": { "medium": { "22": "AABBCC" } }
//! }"#).unwrap();
//!
//! let mut state = DeviceState::new();
//! state.apply(&StateChange::batch(vec![
//!     StateChange::power_on(),
//!     StateChange::mode(HvacMode::Cool),
//!     StateChange::fan_speed(FanSpeed::Medium),
//!     StateChange::temperature(Temperature::new(22).unwrap()),
//! ]));
//!
//! let resolution = resolve(&state, &table, ModelQuirks::default()).unwrap();
//! assert_eq!(resolution.payload().code(), "qrvM");
//! ```

mod resolution;

pub use resolution::{Resolution, Target};

use crate::config::ModelQuirks;
use crate::error::ResolutionError;
use crate::state::DeviceState;
use crate::table::{CodeKey, CodeTable};
use crate::types::{FanSpeed, HvacMode};

/// Selects the code that brings the unit to the believed state.
///
/// A unit that is powered off, or whose mode is `off`, resolves to the
/// table's standalone off code whatever its other fields hold. Otherwise the
/// (mode, fan speed, temperature) key must exist in the table exactly.
///
/// # Errors
///
/// Returns `ResolutionError` naming the requested key if the table has no
/// code for it.
pub fn resolve<'t>(
    state: &DeviceState,
    table: &'t CodeTable,
    quirks: ModelQuirks,
) -> Result<Resolution<'t>, ResolutionError> {
    if state.is_effectively_off() {
        return Ok(Resolution::new(Target::Off, table.off_code()));
    }

    let key = code_key(state, quirks);
    let code = table.lookup(&key)?;
    Ok(Resolution::new(Target::Code(key), code))
}

/// Returns the table key for a powered-on state, with quirks applied.
#[must_use]
pub fn code_key(state: &DeviceState, quirks: ModelQuirks) -> CodeKey {
    let fan_speed = if quirks.dry_forces_low_fan && state.mode() == HvacMode::Dry {
        FanSpeed::Low
    } else {
        state.fan_speed()
    };
    CodeKey::new(state.mode(), fan_speed, state.temperature())
}
