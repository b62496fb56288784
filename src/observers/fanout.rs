//! # Isolated fan-out of one settle to every observer.
//!
//! ## Architecture
//! ```text
//! settled(result)
//!     ├──► observer 1 ──► join(on_member, on_all)
//!     ├──► observer 2 ──► join(on_member, on_all)      all observers polled together
//!     └──► observer N ──► join(on_member, on_all)
//!
//! failed(error)
//!     └──► every observer ──► on_catch
//! ```
//!
//! ## Rules
//! - Every hook runs under `catch_unwind`; an `Err` or a panic is logged (when
//!   enabled) and dropped right there.
//! - The fan-out completes only when every hook has finished.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if an observer uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tracing::warn;

use crate::error::{MemberError, ObserverError, panic_info};
use crate::observers::Observe;

/// Notifies every observer of a successful settle.
pub(crate) async fn settled<A, R>(
    observers: &[Arc<dyn Observe<A, R>>],
    member: &str,
    result: &R,
    args: &A,
    log: bool,
) where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    let hooks: Vec<BoxFuture<'_, ()>> = observers
        .iter()
        .map(|o| {
            async move {
                futures::join!(
                    isolate(o.name(), "member", o.on_member(member, result, args), log),
                    isolate(o.name(), "all", o.on_all(member, result, args), log),
                );
            }
            .boxed()
        })
        .collect();
    join_all(hooks).await;
}

/// Notifies every observer of a failed settle.
pub(crate) async fn failed<A, R>(
    observers: &[Arc<dyn Observe<A, R>>],
    member: &str,
    error: &MemberError,
    args: &A,
    log: bool,
) where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    let hooks: Vec<BoxFuture<'_, ()>> = observers
        .iter()
        .map(|o| isolate(o.name(), "catch", o.on_catch(member, error, args), log).boxed())
        .collect();
    join_all(hooks).await;
}

/// Runs one hook, swallowing its error or panic.
async fn isolate<F>(observer: &str, hook: &'static str, fut: F, log: bool)
where
    F: Future<Output = Result<(), ObserverError>> + Send,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            if log {
                warn!(observer, hook, error = %e, "observer hook failed; ignored");
            }
        }
        Err(payload) => {
            if log {
                let info = panic_info(payload);
                warn!(observer, hook, panic = %info, "observer hook panicked; ignored");
            }
        }
    }
}
