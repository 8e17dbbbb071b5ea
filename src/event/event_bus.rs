// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of [`ClimateEvent`]s to interested listeners.
//!
//! Controllers publish while holding their device lock, so a listener sees
//! one device's events in the order its codes were sent.

use tokio::sync::broadcast;

use super::ClimateEvent;

/// Events a listener may fall behind by before it starts losing them.
const BACKLOG: usize = 256;

/// Broadcast channel shared by one or more controllers.
///
/// A listener that falls more than the backlog behind gets
/// `RecvError::Lagged` and resumes at the oldest retained event. Cloning
/// the bus shares the channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ClimateEvent>,
}

impl EventBus {
    /// Creates a bus with a backlog of 256 events.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(BACKLOG)
    }

    /// Creates a bus retaining up to `capacity` undelivered events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Starts listening. Earlier events are not replayed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClimateEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Hands the event to every current listener and returns how many
    /// there were. With none listening the event is dropped.
    pub fn publish(&self, event: ClimateEvent) -> usize {
        tracing::trace!(device = %event.device_id(), "Publishing climate event");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CommandOutcome, DeviceId};
    use crate::state::DeviceState;

    fn sent(id: &str) -> ClimateEvent {
        ClimateEvent::StateChanged {
            device_id: DeviceId::new(id),
            attributes: DeviceState::new().attributes(),
            outcome: CommandOutcome::Sent,
        }
    }

    #[test]
    fn listeners_are_counted() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        let first = bus.subscribe();
        let _second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(first);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn every_listener_gets_a_copy() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.publish(sent("bf01")), 2);

        assert_eq!(a.recv().await.unwrap().device_id().as_str(), "bf01");
        assert_eq!(b.recv().await.unwrap().device_id().as_str(), "bf01");
    }

    #[test]
    fn nobody_listening() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(sent("bf01")), 0);

        // A late listener does not see the dropped event.
        let mut late = bus.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn clones_share_one_channel() {
        let bus = EventBus::with_capacity(8);
        let other = bus.clone();
        let mut rx = bus.subscribe();

        other.publish(sent("bf02"));
        assert_eq!(rx.try_recv().unwrap().device_id().as_str(), "bf02");
    }

    #[test]
    fn slow_listener_lags() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();

        for id in ["bf01", "bf02", "bf03"] {
            bus.publish(sent(id));
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(rx.try_recv().unwrap().device_id().as_str(), "bf02");
    }
}
