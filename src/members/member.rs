//! # Configured members and their classification.
//!
//! A [`Member`] is one entry of the emitter configuration. It is classified once,
//! at construction time, into one of three variants:
//!
//! - [`Member::Value`] — a pass-through value, never queued or observed;
//! - [`Member::Sync`] — a synchronous callable, run eagerly inside the drain loop;
//! - [`Member::Async`] — an asynchronous callable, awaited inside the drain loop.
//!
//! Callers never see the difference between `Sync` and `Async`: both are invoked
//! through [`Emitter::call`](crate::Emitter::call) and both return a
//! [`Pending`](crate::Pending) future.
//!
//! ## Example
//! ```rust
//! use seriate::{Member, MemberError, MemberKind};
//!
//! let double: Member<u32, u32> = Member::from_fn(|n: u32| Ok::<_, MemberError>(n * 2));
//! let fetch: Member<u32, u32> = Member::from_async(|n: u32| async move { Ok(n + 1) });
//! let limit: Member<u32, u32> = Member::value(10);
//!
//! assert_eq!(double.kind(), MemberKind::Sync);
//! assert_eq!(fetch.kind(), MemberKind::Async);
//! assert_eq!(limit.kind(), MemberKind::Value);
//! ```

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::{MemberError, panic_info};

/// Shared synchronous member callable.
pub type SyncFn<A, R> = Arc<dyn Fn(A) -> Result<R, MemberError> + Send + Sync>;

/// Shared asynchronous member callable; produces a fresh future per call.
pub type AsyncFn<A, R> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<R, MemberError>> + Send + Sync>;

/// Classification tag of a [`Member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Pass-through value.
    Value,
    /// Synchronous callable.
    Sync,
    /// Asynchronous callable.
    Async,
}

/// One named entry of the emitter configuration.
pub enum Member<A, R> {
    /// Exposed unchanged through [`Emitter::value`](crate::Emitter::value).
    Value(R),
    /// Synchronous callable.
    Sync(SyncFn<A, R>),
    /// Asynchronous callable.
    Async(AsyncFn<A, R>),
}

impl<A, R> Member<A, R> {
    /// Creates a pass-through value member.
    pub fn value(value: R) -> Self {
        Member::Value(value)
    }

    /// Creates a synchronous member from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(A) -> Result<R, MemberError> + Send + Sync + 'static,
    {
        Member::Sync(Arc::new(f))
    }

    /// Creates an asynchronous member from a closure returning a future.
    ///
    /// The closure is called once per invocation; each call produces a new future.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        A: 'static,
        R: 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, MemberError>> + Send + 'static,
    {
        Member::Async(Arc::new(move |args| f(args).boxed()))
    }

    /// Returns the classification tag.
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Value(_) => MemberKind::Value,
            Member::Sync(_) => MemberKind::Sync,
            Member::Async(_) => MemberKind::Async,
        }
    }

    /// Returns `true` for `Sync` and `Async` members.
    pub fn is_callable(&self) -> bool {
        !matches!(self, Member::Value(_))
    }

    /// Returns the invoker for callable members, `None` for values.
    pub(crate) fn invoker(&self) -> Option<Invoke<A, R>> {
        match self {
            Member::Value(_) => None,
            Member::Sync(f) => Some(Invoke::Sync(Arc::clone(f))),
            Member::Async(f) => Some(Invoke::Async(Arc::clone(f))),
        }
    }
}

impl<A, R: fmt::Debug> fmt::Debug for Member<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Member::Sync(_) => f.write_str("Sync(..)"),
            Member::Async(_) => f.write_str("Async(..)"),
        }
    }
}

/// Callable half of a [`Member`], captured by a queued call.
pub(crate) enum Invoke<A, R> {
    Sync(SyncFn<A, R>),
    Async(AsyncFn<A, R>),
}

impl<A, R> Invoke<A, R> {
    /// Runs the callable to completion.
    ///
    /// Panics raised while calling (or polling) the member are caught and
    /// returned as [`MemberError::Panicked`].
    pub(crate) async fn run(self, args: A) -> Result<R, MemberError> {
        match self {
            Invoke::Sync(f) => std::panic::catch_unwind(AssertUnwindSafe(|| f(args)))
                .unwrap_or_else(|payload| Err(MemberError::Panicked { info: panic_info(payload) })),
            Invoke::Async(f) => {
                let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| f(args))) {
                    Ok(fut) => fut,
                    Err(payload) => {
                        return Err(MemberError::Panicked {
                            info: panic_info(payload),
                        });
                    }
                };
                AssertUnwindSafe(fut)
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|payload| Err(MemberError::Panicked { info: panic_info(payload) }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_member_runs_eagerly() {
        let m: Member<u32, u32> = Member::from_fn(|n| Ok(n + 1));
        let out = m.invoker().expect("callable").run(41).await;
        assert_eq!(out, Ok(42));
    }

    #[tokio::test]
    async fn test_async_member_is_awaited() {
        let m: Member<u32, u32> = Member::from_async(|n| async move {
            tokio::task::yield_now().await;
            Ok(n * 3)
        });
        let out = m.invoker().expect("callable").run(5).await;
        assert_eq!(out, Ok(15));
    }

    #[test]
    fn test_value_has_no_invoker() {
        let m: Member<(), &str> = Member::value("static");
        assert!(m.invoker().is_none());
        assert!(!m.is_callable());
        assert_eq!(format!("{m:?}"), "Value(\"static\")");
    }

    #[tokio::test]
    async fn test_sync_panic_is_caught() {
        let m: Member<(), ()> = Member::from_fn(|_| -> Result<(), MemberError> { panic!("sync boom") });
        let out = m.invoker().expect("callable").run(()).await;
        assert_eq!(
            out,
            Err(MemberError::Panicked {
                info: "sync boom".into()
            })
        );
    }

    #[tokio::test]
    async fn test_async_panic_is_caught() {
        let m: Member<(), ()> = Member::from_async(|_| async move {
            tokio::task::yield_now().await;
            if true {
                panic!("async boom");
            }
            Ok(())
        });
        let out = m.invoker().expect("callable").run(()).await;
        assert!(matches!(out, Err(MemberError::Panicked { info }) if info == "async boom"));
    }
}
