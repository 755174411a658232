//! Code stolen from futures crate -- https://docs.rs/futures-util/0.3.5/src/futures_util/stream/stream/buffer_unordered.rs.html#15-23
//!
//! Sliding-window execution with cooperative cancellation: once the shared
//! flag is raised the adapter stops pulling new futures from the underlying
//! stream but keeps driving the in-flight ones to completion, so a drained
//! result set never contains half-finished work.

use core::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{Fuse, FuturesUnordered, StreamExt};
use futures::task::{Context, Poll};
use futures::{Future, Stream};
use pin_project::pin_project;

/// A shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    inner: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> CancellationFlag {
        CancellationFlag::default()
    }

    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

impl<T: ?Sized> StreamExtBufferUnorderedCancellable for T where T: StreamExt {}

pub trait StreamExtBufferUnorderedCancellable: StreamExt {
    fn buffered_unordered_cancellable(
        self,
        n: usize,
        cancellation: CancellationFlag,
    ) -> BufferUnorderedCancellable<Self>
    where
        Self: Sized,
        Self::Item: Future,
    {
        BufferUnorderedCancellable::new(self, n, cancellation)
    }
}

#[pin_project(project = BufferUnorderedCancellableProj)]
#[must_use = "streams do nothing unless polled"]
pub struct BufferUnorderedCancellable<St>
where
    St: Stream,
    St::Item: Future,
{
    #[pin]
    stream: Fuse<St>,
    in_progress_queue: FuturesUnordered<St::Item>,
    max: usize,
    cancellation: CancellationFlag,
}

impl<St> BufferUnorderedCancellable<St>
where
    St: Stream,
    St::Item: Future,
{
    pub(crate) fn new(stream: St, n: usize, cancellation: CancellationFlag) -> BufferUnorderedCancellable<St> {
        BufferUnorderedCancellable {
            stream: stream.fuse(),
            in_progress_queue: FuturesUnordered::new(),
            max: n,
            cancellation,
        }
    }
}

impl<St> Stream for BufferUnorderedCancellable<St>
where
    St: Stream,
    St::Item: Future,
{
    type Item = <St::Item as Future>::Output;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let BufferUnorderedCancellableProj {
            mut stream,
            in_progress_queue,
            max,
            cancellation,
        } = self.project();

        // First up, try to spawn off as many futures as possible by filling
        // up our queue of futures -- unless we have been cancelled, in which
        // case the remaining input is abandoned.
        if !cancellation.is_cancelled() {
            while in_progress_queue.len() < *max {
                match stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(fut)) => in_progress_queue.push(fut),
                    Poll::Ready(None) | Poll::Pending => break,
                }
            }
        }

        // Attempt to pull the next value from the in_progress_queue
        match in_progress_queue.poll_next_unpin(cx) {
            x @ Poll::Pending => return x,
            x @ Poll::Ready(Some(_)) => return x,
            Poll::Ready(None) => {}
        }

        // If more values are still coming from the stream, we're not done yet
        if stream.is_done() || cancellation.is_cancelled() {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
