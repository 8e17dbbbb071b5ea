// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for air conditioner control.
//!
//! Each type only admits values inside its domain, so a value that reaches
//! the code resolver has already been validated.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off
//! - [`HvacMode`] - off, cool, heat, dry, fan, auto
//! - [`FanSpeed`] - auto, quiet, low, medium, high, highest
//! - [`Temperature`] - Whole degrees Celsius (16-31)

mod fan_speed;
mod mode;
mod power;
mod temperature;

pub use fan_speed::FanSpeed;
pub use mode::HvacMode;
pub use power::PowerState;
pub use temperature::Temperature;
