// ── State containers ──
//
// Each slice of dashboard state is a plain value with a pure reducer.
// A `Slice` wraps one in a `watch` channel so consumers can read the
// latest value or wait for the next change.

mod auth;
mod operation;
mod resource;
mod tree;

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

pub use auth::{AuthEvent, AuthPhase, AuthState};
pub use operation::{OperationEvent, OperationState};
pub use resource::{Query, ResourceEvent, ResourceState};
pub use tree::{RootState, StateTree, TreeResource};

/// A state value that changes only through events.
pub trait Reducer: Clone + Send + Sync + 'static {
    type Event;

    /// Apply `event`. Returns `true` when the state changed.
    fn reduce(&mut self, event: Self::Event) -> bool;
}

// ── Slice ────────────────────────────────────────────────────────────

/// One observable state container.
pub struct Slice<S: Reducer> {
    sender: watch::Sender<S>,
    /// Sequence numbers handed to list/search requests for fencing.
    seq: AtomicU64,
}

impl<S: Reducer> Slice<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            seq: AtomicU64::new(0),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Subscribe to changes.
    pub fn watch(&self) -> SliceWatch<S> {
        SliceWatch::new(self.sender.subscribe())
    }

    /// Run the reducer. Subscribers are notified only when it reports a change.
    pub fn dispatch(&self, event: S::Event) -> bool {
        self.sender.send_if_modified(|state| state.reduce(event))
    }

    pub(crate) fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

// ── SliceWatch ───────────────────────────────────────────────────────

/// A subscription to one slice.
///
/// Provides point-in-time access and change notification, either through
/// `changed()` or by converting to a `Stream`.
pub struct SliceWatch<T: Clone + Send + Sync + 'static> {
    current: T,
    receiver: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> SliceWatch<T> {
    fn new(receiver: watch::Receiver<T>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The value captured at creation or at the last `changed()`.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// The latest value (may have changed since creation).
    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change and return the new value.
    /// Returns `None` once the state tree has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        let value = self.receiver.borrow_and_update().clone();
        self.current = value.clone();
        Some(value)
    }

    /// Convert into a `Stream`. The first item is the current value.
    pub fn into_stream(self) -> SliceStream<T> {
        SliceStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct SliceStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<T>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SliceStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
