//! Concurrency policies for flattening an intent stream into change streams.
//!
//! Each policy is a combinator over [`Stream`]: it maps every source item
//! to an inner stream and decides how inner streams share time.
//!
//! | Combinator          | Policy when a new item arrives                 |
//! |---------------------|------------------------------------------------|
//! | [`take_first`]      | only the first item passes at all              |
//! | [`flat_map_concat`] | queued until the running inner stream finishes |
//! | [`flat_map_first`]  | ignored while an inner stream is running       |
//! | [`flat_map_merge`]  | started immediately, all run concurrently      |

mod flat_map_first;
mod take_first;

use std::pin::Pin;

use futures::stream::{Stream, StreamExt};

pub use flat_map_first::FlatMapFirst;
pub use take_first::TakeFirst;

/// Let only the first item through, then end.
pub fn take_first<S>(source: S) -> TakeFirst<S>
where
    S: Stream,
{
    TakeFirst::new(source)
}

/// Run inner streams one after another, in source order.
pub fn flat_map_concat<S, F, U>(source: S, f: F) -> impl Stream<Item = U::Item>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Stream,
{
    source.map(f).flatten()
}

/// Exhaust-first: ignore source items while an inner stream is running.
pub fn flat_map_first<S, F, U>(source: S, f: F) -> FlatMapFirst<S, F, U>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Stream,
{
    FlatMapFirst::new(source, f)
}

/// Start an inner stream for every item and interleave their output.
///
/// Inner streams complete in whatever order they finish.
pub fn flat_map_merge<S, F, U>(source: S, mut f: F) -> impl Stream<Item = U::Item>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Stream,
{
    source
        .map(move |item| -> Pin<Box<U>> { Box::pin(f(item)) })
        .flatten_unordered(None)
}
