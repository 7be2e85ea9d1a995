//! Interruption of the task driving an engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Signals the task running [`TransferEngine::work`](super::TransferEngine::work)
/// to stop right away.
///
/// Unlike cancelling the request, interrupting does not wait for the chunk,
/// request or backoff in flight: all of them are abandoned and `work()`
/// returns [`Error::Interrupted`](crate::Error::Interrupted). The flag stays
/// set until [`reset`](Interrupter::reset) is called.
#[derive(Debug, Clone, Default)]
pub struct Interrupter {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    flag: AtomicBool,
    notify: Notify,
}

impl Interrupter {
    /// Creates an interrupter that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interrupt every engine sharing this interrupter.
    pub fn interrupt(&self) {
        self.inner.flag.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Whether an interruption is pending.
    pub fn is_interrupted(&self) -> bool {
        self.inner.flag.load(Ordering::Acquire)
    }

    /// Clear the pending interruption.
    pub fn reset(&self) {
        self.inner.flag.store(false, Ordering::Release);
    }

    /// Completes once [`interrupt`](Interrupter::interrupt) has been called.
    pub async fn interrupted(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent interrupt is not missed.
            notified.as_mut().enable();
            if self.is_interrupted() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_interrupted_wakes_waiter() {
        let interrupter = Interrupter::new();
        let remote = interrupter.clone();
        let waiter = tokio::spawn(async move { interrupter.interrupted().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        remote.interrupt();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert!(remote.is_interrupted());
    }

    #[tokio::test]
    async fn test_already_interrupted_returns_immediately() {
        let interrupter = Interrupter::new();
        interrupter.interrupt();
        interrupter.interrupted().await;
        interrupter.reset();
        assert!(!interrupter.is_interrupted());
    }
}
