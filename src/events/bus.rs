//! Event delivery.
//!
//! The bus is a fan-out over typed channels. Each subscriber gets its own
//! `Receiver` and sees every event published after it subscribed, in
//! publication order. Subscribers that drop their receiver are pruned on
//! the next publish.

use std::sync::mpsc::{self, Receiver, Sender};

use super::EngineEvent;

/// Fan-out publisher for [`EngineEvent`]s.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<EngineEvent>>,
    published: u64,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber.
    pub fn publish(&mut self, event: EngineEvent) {
        log::trace!("publish {event:?}");
        self.published += 1;

        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Deliver several events in order.
    pub fn publish_all(&mut self, events: impl IntoIterator<Item = EngineEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total events published, with or without subscribers.
    #[must_use]
    pub fn published_count(&self) -> u64 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_order() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();

        bus.publish(EngineEvent::Paused);
        bus.publish(EngineEvent::Resumed);
        bus.publish(EngineEvent::BoardReset);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![EngineEvent::Paused, EngineEvent::Resumed, EngineEvent::BoardReset]
        );
    }

    #[test]
    fn test_fan_out() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(EngineEvent::MultiplierChanged { multiplier: 2 });

        assert_eq!(a.try_iter().count(), 1);
        assert_eq!(b.try_iter().count(), 1);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let mut bus = EventBus::new();
        bus.publish(EngineEvent::Paused);
        let rx = bus.subscribe();
        bus.publish(EngineEvent::Resumed);

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![EngineEvent::Resumed]);
        assert_eq!(bus.published_count(), 2);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let keep = bus.subscribe();
        let gone = bus.subscribe();
        drop(gone);

        bus.publish(EngineEvent::Paused);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_iter().count(), 1);

        drop(keep);
        bus.publish(EngineEvent::Resumed);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
