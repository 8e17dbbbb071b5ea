// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection details of one IR blaster.

use std::fmt;

use crate::config::ProtocolVersion;

/// Everything a transport needs to reach one IR blaster.
///
/// Built from a [`DeviceConfig`](crate::config::DeviceConfig). The local key
/// is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    device_id: String,
    local_key: String,
    ip: String,
    version: ProtocolVersion,
}

impl DeviceHandle {
    /// Creates a handle.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        local_key: impl Into<String>,
        ip: impl Into<String>,
        version: ProtocolVersion,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            local_key: local_key.into(),
            ip: ip.into(),
            version,
        }
    }

    /// Returns the Tuya device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the local encryption key.
    #[must_use]
    pub fn local_key(&self) -> &str {
        &self.local_key
    }

    /// Returns the blaster's IP address.
    #[must_use]
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Returns the protocol version.
    #[must_use]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("device_id", &self.device_id)
            .field("local_key", &"<redacted>")
            .field("ip", &self.ip)
            .field("version", &self.version)
            .finish()
    }
}
