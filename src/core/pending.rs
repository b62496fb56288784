//! # Pending result of a wrapped call.
//!
//! Every [`Emitter::call`](crate::Emitter::call) returns a [`Pending`], whether the
//! member is synchronous or asynchronous.
//!
//! ## Rules
//! - The call is queued when `call` returns; awaiting `Pending` only waits for it.
//! - Dropping a `Pending` does **not** withdraw the call: it still runs and observers
//!   still see it, only the result is discarded.
//! - Rejections decided before queueing (double `initialize`, unknown member) are
//!   ready immediately.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::CallError;

/// Reply channel of one queued call.
pub(crate) type Reply<R> = oneshot::Sender<Result<R, CallError>>;

/// Future resolving to the outcome of one wrapped call.
#[derive(Debug)]
pub struct Pending<R> {
    state: State<R>,
}

#[derive(Debug)]
enum State<R> {
    Rejected(Option<CallError>),
    Queued(oneshot::Receiver<Result<R, CallError>>),
}

impl<R> Pending<R> {
    /// Creates a queued pending result and its reply sender.
    pub(crate) fn channel() -> (Reply<R>, Self) {
        let (tx, rx) = oneshot::channel();
        (
            tx,
            Self {
                state: State::Queued(rx),
            },
        )
    }

    /// Creates a pending result that is already rejected.
    pub(crate) fn rejected(error: CallError) -> Self {
        Self {
            state: State::Rejected(Some(error)),
        }
    }

    /// Returns `true` if the call was rejected without being queued.
    pub fn is_rejected(&self) -> bool {
        matches!(self.state, State::Rejected(_))
    }
}

impl<R> Unpin for Pending<R> {}

impl<R> Future for Pending<R> {
    type Output = Result<R, CallError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Rejected(error) => Poll::Ready(Err(error.take().unwrap_or(CallError::Closed))),
            State::Queued(rx) => Pin::new(rx)
                .poll(cx)
                .map(|reply| reply.unwrap_or(Err(CallError::Closed))),
        }
    }
}
