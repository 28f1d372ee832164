//! In-memory signal bus.

use std::sync::{Mutex, mpsc};

use crate::bus::{SignalBus, Subscription};

#[derive(Debug)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

/// In-memory pub/sub bus backed by std channels.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - Duplicates acceptable (subscribers must be idempotent)
#[derive(Debug)]
pub struct InMemorySignalBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemorySignalBus<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemorySignalBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> SignalBus<M> for InMemorySignalBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryBusError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::signal::SessionSignal;

    #[test]
    fn every_subscriber_receives_each_signal() {
        let bus = InMemorySignalBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(SessionSignal::ForcedLogout { status: 401 })
            .unwrap();

        assert_eq!(a.recv().unwrap(), SessionSignal::ForcedLogout { status: 401 });
        assert_eq!(b.recv().unwrap(), SessionSignal::ForcedLogout { status: 401 });
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let bus = InMemorySignalBus::new();
        let live = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(SessionSignal::ForcedLogout { status: 403 })
            .unwrap();

        assert!(live.recv_timeout(Duration::from_millis(100)).is_ok());
    }

    #[test]
    fn recv_timeout_expires_when_no_signal_pending() {
        let bus: InMemorySignalBus<SessionSignal> = InMemorySignalBus::new();
        let sub = bus.subscribe();

        assert!(sub.recv_timeout(Duration::from_millis(10)).is_err());
    }
}
