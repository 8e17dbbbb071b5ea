// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transmission counters for one controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a controller's transmission history.
///
/// Only commands that reach the resolver are counted; validation failures
/// happen before a command starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Codes sent without a reported error.
    pub sent: u64,
    /// Commands that failed to resolve or to send.
    pub failed: u64,
    /// Message of the most recent failure.
    pub last_error: Option<String>,
    /// What the most recent successful send drove the unit to, e.g.
    /// `cool.medium.22` or `off`.
    pub last_target: Option<String>,
    /// Time of the most recent successful send.
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl Diagnostics {
    pub(crate) fn record_sent(&mut self, target: String) {
        self.sent += 1;
        self.last_target = Some(target);
        self.last_sent_at = Some(Utc::now());
    }

    pub(crate) fn record_failure(&mut self, error: String) {
        self.failed += 1;
        self.last_error = Some(error);
    }

    /// Returns the total number of attempted commands.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.sent + self.failed
    }
}
