//! One-shot cancellation for in-flight searches
//!
//! [`pair`] creates a [`CancelHandle`], which the controller keeps, and a
//! [`CancelSignal`], which the request races against the backend. Firing the
//! handle resolves the signal; so does dropping it, which covers a controller
//! that goes away while a request is still suspended.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Identifier of one search request, unique per controller
pub type RequestId = u64;

/// Why a pending request stopped counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// A newer input event replaced the request
    Superseded,
    /// The controller was torn down
    Teardown,
    /// The handle was dropped without being fired
    Abandoned,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CancelReason::Superseded => "superseded",
            CancelReason::Teardown => "teardown",
            CancelReason::Abandoned => "abandoned",
        })
    }
}

/// Create a connected handle and signal for one request
pub fn pair(id: RequestId) -> (CancelHandle, CancelSignal) {
    let (tx, rx) = oneshot::channel();
    (CancelHandle { id, tx: Some(tx) }, CancelSignal { id, rx })
}

/// Controller-side half; fires at most once
pub struct CancelHandle {
    id: RequestId,
    tx: Option<oneshot::Sender<CancelReason>>,
}

impl CancelHandle {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Fire the signal. Returns `true` only for the first call.
    pub fn cancel(&mut self, reason: CancelReason) -> bool {
        match self.tx.take() {
            Some(tx) => {
                // The request may already have finished and dropped its signal
                let _ = tx.send(reason);
                true
            }
            None => false,
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.tx.is_none()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("id", &self.id)
            .field("canceled", &self.is_canceled())
            .finish()
    }
}

/// Request-side half; resolves with the reason once canceled
#[derive(Debug)]
pub struct CancelSignal {
    id: RequestId,
    rx: oneshot::Receiver<CancelReason>,
}

impl CancelSignal {
    pub fn id(&self) -> RequestId {
        self.id
    }
}

impl Future for CancelSignal {
    type Output = CancelReason;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(CancelReason::Abandoned))
    }
}
