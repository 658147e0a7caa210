//! Request-scoped cancellation signals.
//!
//! A [`CancelHandle`] is held by the request owner; every party that needs to
//! observe cancellation gets a cloned [`CancelSignal`]. Dropping the handle
//! cancels the signal, so a handler future that is dropped mid-flight (e.g.
//! the HTTP client disconnected) cancels its in-flight work automatically.
//!
//! Signals compose: [`CancelSignal::merge`] yields a signal that fires when
//! either input fires, which is how a per-module deadline combines with the
//! caller's request-level cancellation.

use tokio::sync::watch;

/// Owning side of a cancellation signal.
///
/// Cancels on [`CancelHandle::cancel`] or on drop.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Create a new handle and its first signal.
    pub fn new() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelSignal { rxs: vec![rx] })
    }

    /// Trip the signal. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Obtain another signal observing this handle.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rxs: vec![self.tx.subscribe()],
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(true);
    }
}

/// Observing side of one or more cancellation signals.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rxs: Vec<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self { rxs: Vec::new() }
    }

    /// Returns true once any underlying handle has cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.rxs.iter().any(|rx| *rx.borrow())
    }

    /// Combine two signals into one that fires when either fires.
    pub fn merge(&self, other: &CancelSignal) -> CancelSignal {
        let mut rxs = self.rxs.clone();
        rxs.extend(other.rxs.iter().cloned());
        CancelSignal { rxs }
    }

    /// Resolve once cancellation fires. Pends forever for [`Self::never`].
    pub async fn cancelled(&self) {
        if self.rxs.is_empty() {
            return std::future::pending().await;
        }

        let waits = self.rxs.iter().map(|rx| {
            let mut rx = rx.clone();
            Box::pin(async move {
                // A dropped sender without a prior cancel means the signal
                // can no longer fire; keep pending rather than resolving.
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    std::future::pending::<()>().await;
                }
            })
        });

        futures::future::select_all(waits).await;
    }
}
