//! Cancellable deferred delivery of controller events.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Delivers one delayed event at a time into an unbounded channel.
///
/// Scheduling replaces whatever was pending. Dropping the scheduler aborts
/// the pending task, so a torn-down view never receives a late callback.
#[derive(Debug)]
pub struct Scheduler<E> {
    tx: mpsc::UnboundedSender<E>,
    pending: Option<JoinHandle<()>>,
}

impl<E: Send + std::fmt::Debug + 'static> Scheduler<E> {
    /// Creates a scheduler delivering into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<E>) -> Self {
        Self { tx, pending: None }
    }

    /// Creates a scheduler together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<E>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Sends `event` after `after`, cancelling any pending delivery.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, after: Duration, event: E) {
        self.cancel();
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            trace!(?event, "Delivering deferred event");
            // The receiver is gone when the view was torn down.
            let _ = tx.send(event);
        }));
    }
}

impl<E> Scheduler<E> {
    /// Aborts the pending delivery, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending deferred event");
            }
            handle.abort();
        }
    }

    /// True while a delivery is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (mut scheduler, mut rx) = Scheduler::channel();
        scheduler.schedule(Duration::from_millis(500), 1u32);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_delivery() {
        let (mut scheduler, mut rx) = Scheduler::channel();
        scheduler.schedule(Duration::from_millis(500), 1u32);
        scheduler.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_suppresses_delivery() {
        let (mut scheduler, mut rx) = Scheduler::channel();
        scheduler.schedule(Duration::from_millis(500), 1u32);
        drop(scheduler);

        // Every sender is gone once the aborted task is dropped.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending() {
        let (mut scheduler, mut rx) = Scheduler::channel();
        scheduler.schedule(Duration::from_millis(500), "first");
        scheduler.schedule(Duration::from_millis(500), "second");

        assert_eq!(rx.recv().await, Some("second"));
        drop(scheduler);
        assert_eq!(rx.recv().await, None);
    }
}
