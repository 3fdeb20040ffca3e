use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;

/// Stream for [`take_first`](super::take_first).
///
/// The source is dropped as soon as the first item is out, which releases
/// whatever it holds (e.g. a bus subscription) even if the consumer keeps
/// running for a long time afterwards.
pub struct TakeFirst<S> {
    source: Option<Pin<Box<S>>>,
}

impl<S: Stream> TakeFirst<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Some(Box::pin(source)),
        }
    }
}

impl<S: Stream> Stream for TakeFirst<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(source) = this.source.as_mut() else {
            return Poll::Ready(None);
        };

        match source.as_mut().poll_next(cx) {
            Poll::Ready(item) => {
                this.source = None;
                Poll::Ready(item)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
