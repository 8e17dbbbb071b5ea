// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration.
//!
//! A [`DeviceConfig`] identifies the IR blaster on the network and the air
//! conditioner model it controls. The model selects the code table and any
//! [`ModelQuirks`] applied while resolving codes.

mod device_config;
mod model;

pub use device_config::DeviceConfig;
pub use model::{DeviceModel, ModelQuirks, ProtocolVersion};
