// ── Render subscriptions ──
//
// A watch-backed `RenderNotifier` for consumers that would rather await
// render requests than pass a callback.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::notify::RenderNotifier;

/// Render notifier that bumps a generation counter on every render.
///
/// Subscribers see the latest generation; bursts of renders between two
/// polls collapse into one wake-up.
#[derive(Debug, Clone)]
pub struct RenderSignal {
    generation: Arc<watch::Sender<u64>>,
}

impl RenderSignal {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0u64);
        Self {
            generation: Arc::new(generation),
        }
    }

    /// Number of renders requested so far.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    pub fn subscribe(&self) -> RenderStream {
        RenderStream::new(self.generation.subscribe())
    }
}

impl Default for RenderSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderNotifier for RenderSignal {
    fn render(&self) {
        self.generation.send_modify(|g| *g = g.wrapping_add(1));
    }
}

/// A subscription to render requests.
pub struct RenderStream {
    current: u64,
    receiver: watch::Receiver<u64>,
}

impl RenderStream {
    pub(crate) fn new(receiver: watch::Receiver<u64>) -> Self {
        let current = *receiver.borrow();
        Self { current, receiver }
    }

    /// Generation seen at creation or at the last `changed()`.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Wait for the next render request, returning its generation.
    /// Returns `None` once the signal has been dropped.
    pub async fn changed(&mut self) -> Option<u64> {
        self.receiver.changed().await.ok()?;
        let generation = *self.receiver.borrow_and_update();
        self.current = generation;
        Some(generation)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> RenderWatchStream {
        RenderWatchStream {
            inner: WatchStream::from_changes(self.receiver),
        }
    }
}

/// `Stream` adapter yielding the generation of each render request.
pub struct RenderWatchStream {
    inner: WatchStream<u64>,
}

impl Stream for RenderWatchStream {
    type Item = u64;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
