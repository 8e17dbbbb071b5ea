// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport boundary to the Tuya IR blaster.
//!
//! The controller hands every resolved code to a [`Transport`]. The
//! transport owns the session with the blaster (encryption, framing,
//! sockets); this crate only defines what gets sent and how the reply is
//! judged.
//!
//! # Payload
//!
//! A learned code is sent as a data-point map: data point `1` selects the
//! `study_key` control and data point `7` carries the base64 code.
//!
//! ```
//! use tuya_ir_ac::transport::LearnedCodePayload;
//!
//! let payload = LearnedCodePayload::new("qrvM");
//! assert_eq!(
//!     payload.to_json().unwrap(),
//!     r#"{"1":"study_key","7":"qrvM"}"#
//! );
//! ```

mod handle;
mod payload;

use std::sync::Arc;

pub use handle::DeviceHandle;
pub use payload::{LearnedCodePayload, SendReply};

use crate::error::ProtocolError;

/// Trait for transports that can deliver learned codes to an IR blaster.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a learned-code payload to the blaster.
    ///
    /// Returns the blaster's reply. A reply carrying a result is a failure
    /// reported by the device; see [`SendReply::into_result`].
    ///
    /// # Arguments
    ///
    /// * `handle` - Connection details of the blaster
    /// * `payload` - The data points to set
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the payload could not be delivered.
    async fn send_learned_code(
        &self,
        handle: &DeviceHandle,
        payload: &LearnedCodePayload,
    ) -> Result<SendReply, ProtocolError>;
}

impl<T: Transport> Transport for Arc<T> {
    async fn send_learned_code(
        &self,
        handle: &DeviceHandle,
        payload: &LearnedCodePayload,
    ) -> Result<SendReply, ProtocolError> {
        (**self).send_learned_code(handle, payload).await
    }
}
