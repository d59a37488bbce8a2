//! Broadcast of state changes to any number of listeners.
//!
//! Publishing never blocks and never fails: with no subscribers the event is
//! dropped, and a subscriber that falls more than the channel capacity behind
//! sees `RecvError::Lagged` on its next receive.

use shared::StateChange;
use tokio::sync::broadcast;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StateChange>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: StateChange) {
        debug!("Publishing {:?}", event);
        // no receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.sender.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        bus.publish(StateChange::LoggedIn);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_every_subscriber_sees_events_in_order() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(StateChange::LoggedIn);
        bus.publish(StateChange::DraftReset);

        for receiver in [&mut first, &mut second] {
            assert_eq!(receiver.try_recv().unwrap(), StateChange::LoggedIn);
            assert_eq!(receiver.try_recv().unwrap(), StateChange::DraftReset);
            assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
        }
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::default();
        bus.publish(StateChange::LoggedIn);

        let mut receiver = bus.subscribe();
        bus.publish(StateChange::LoggedOut);

        assert_eq!(receiver.try_recv().unwrap(), StateChange::LoggedOut);
    }

    #[test]
    fn test_slow_subscriber_lags() {
        let bus = EventBus::new(2);
        let mut receiver = bus.subscribe();

        for _ in 0..3 {
            bus.publish(StateChange::DraftReset);
        }

        assert_eq!(receiver.try_recv(), Err(TryRecvError::Lagged(1)));
        assert_eq!(receiver.try_recv().unwrap(), StateChange::DraftReset);
    }
}
