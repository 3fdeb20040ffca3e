use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;

/// Stream for [`flat_map_first`](super::flat_map_first).
///
/// Holds at most one inner stream. Source items that arrive while it is
/// running are dropped, not queued.
pub struct FlatMapFirst<S, F, U> {
    source: Pin<Box<S>>,
    f: F,
    inner: Option<Pin<Box<U>>>,
    source_done: bool,
}

// `f` is only ever used through `&mut`, never pinned.
impl<S, F, U> Unpin for FlatMapFirst<S, F, U> {}

impl<S, F, U> FlatMapFirst<S, F, U>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Stream,
{
    pub fn new(source: S, f: F) -> Self {
        Self {
            source: Box::pin(source),
            f,
            inner: None,
            source_done: false,
        }
    }

    /// Whether an inner stream is currently running.
    pub fn is_busy(&self) -> bool {
        self.inner.is_some()
    }
}

impl<S, F, U> Stream for FlatMapFirst<S, F, U>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Stream,
{
    type Item = U::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(inner) = this.inner.as_mut() {
                match inner.as_mut().poll_next(cx) {
                    Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                    Poll::Ready(None) => this.inner = None,
                    Poll::Pending => {}
                }
            }

            if this.source_done {
                return if this.inner.is_none() {
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                };
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if this.inner.is_none() {
                        this.inner = Some(Box::pin((this.f)(item)));
                    } else {
                        tracing::trace!("Ignoring trigger while previous operation is in flight");
                    }
                }
                Poll::Ready(None) => this.source_done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
