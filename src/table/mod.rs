// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infrared code tables.
//!
//! Each air conditioner model has its own table of pre-learned codes, one
//! per (mode, fan speed, temperature) combination plus a standalone off
//! code. Tables are immutable once loaded and shared between devices through
//! a [`TableRegistry`].

mod code;
mod code_table;
mod registry;

pub use code::{CodeKey, IrCode};
pub use code_table::CodeTable;
pub use registry::TableRegistry;
