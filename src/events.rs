//! Change notifications for game controllers.

use tokio::sync::mpsc;
use tracing::trace;

/// List of subscribers notified after every accepted transition.
///
/// Each subscriber receives its own copy of the event through an unbounded
/// channel. Subscribers whose receiver was dropped are pruned on the next
/// notification.
#[derive(Debug)]
pub struct Observers<E> {
    senders: Vec<mpsc::UnboundedSender<E>>,
}

impl<E: Clone> Observers<E> {
    /// Creates an empty subscriber list.
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// Adds a subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.push(tx);
        rx
    }

    /// Sends `event` to every live subscriber.
    pub fn notify(&mut self, event: E) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
        trace!(subscribers = self.senders.len(), "Notified observers");
    }

    /// Number of live subscribers as of the last notification.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// True when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl<E: Clone> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_gets_a_copy() {
        let mut observers = Observers::new();
        let mut a = observers.subscribe();
        let mut b = observers.subscribe();

        observers.notify(7u8);

        assert_eq!(a.try_recv().unwrap(), 7);
        assert_eq!(b.try_recv().unwrap(), 7);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut observers = Observers::new();
        let keep = observers.subscribe();
        drop(observers.subscribe());

        observers.notify("ping");

        assert_eq!(observers.len(), 1);
        drop(keep);
    }
}
