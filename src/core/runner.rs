//! # Drain loop and single-call settlement.
//!
//! The drain loop is spawned on the idle → flushing transition and runs jobs one at a
//! time until the queue is empty.
//!
//! ## Job flow
//! ```text
//! loop {
//!   ├─► next job (under the state lock; empty queue ⇒ flushing = false, exit)
//!   ├─► Settle(call):
//!   │       ├─ member.run(args.clone())          (sync: eager, async: awaited; panics caught)
//!   │       ├─ Ok(result)  ──► enabled? ──► fan out on_member + on_all ──► reply Ok(result)
//!   │       └─ Err(error)  ──► fan out on_catch (always) ──► reply Err(Member(error))
//!   └─► Unsubscribe(id): remove from registry
//! }
//! notify idle waiters
//! ```
//!
//! ## Rules
//! - Exactly one job runs at a time; the next one starts only after the previous
//!   fan-out and reply.
//! - A failed member never stops the loop.
//! - The state lock is never held across an await.

use std::sync::Arc;

use tracing::{Instrument, debug, debug_span, trace};

use crate::core::emitter::{Call, Inner, Job};
use crate::error::CallError;
use crate::observers;

impl<A, R> Inner<A, R>
where
    A: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Runs queued jobs until the queue is observed empty.
    pub(crate) async fn drain(self: Arc<Self>) {
        debug!(emitter = %self.cfg.label, "drain started");

        loop {
            let job = self.state.lock().seq.next();
            match job {
                Some(Job::Settle(call)) => self.settle(call).await,
                Some(Job::Unsubscribe(id)) => {
                    let removed = self.registry.remove(id);
                    debug!(emitter = %self.cfg.label, subscription = %id, removed, "deferred unsubscribe applied");
                }
                None => break,
            }
        }

        debug!(emitter = %self.cfg.label, "drain idle");
        self.idle.notify_waiters();
    }

    /// Runs one call, notifies observers, then replies to the caller.
    async fn settle(&self, call: Call<A, R>) {
        let Call {
            member,
            invoke,
            args,
            reply,
        } = call;
        let span = debug_span!("emitter.settle", emitter = %self.cfg.label, member = %member);

        async move {
            let log = self.cfg.log_observer_errors;
            let outcome = match invoke.run(args.clone()).await {
                Ok(result) => {
                    if self.is_enabled() {
                        let observers = self.registry.snapshot();
                        observers::settled(&observers, &member, &result, &args, log).await;
                    } else {
                        trace!("observers disabled; success fan-out skipped");
                    }
                    Ok(result)
                }
                Err(error) => {
                    debug!(error = %error, label = error.as_label(), "member failed");
                    let observers = self.registry.snapshot();
                    observers::failed(&observers, &member, &error, &args, log).await;
                    Err(CallError::Member(error))
                }
            };

            if reply.send(outcome).is_err() {
                trace!("pending result dropped by caller");
            }
        }
        .instrument(span)
        .await
    }
}
