//! # Emitter: queue-backed wrapper around a fixed set of members.
//!
//! The [`Emitter`] owns the member table, the job queue, the initialization gate,
//! the enable flag and the observer registry. Every wrapped call goes through one
//! queue and one drain loop, so calls settle strictly one after another in call
//! order, whatever mix of sync and async members they hit.
//!
//! ## Call path
//! ```text
//! call(name, args)
//!   ├─ unknown name / value member ─────────────► Pending (rejected)
//!   └─ lock state
//!        ├─ gate.admit(name == "initialize")
//!        │     ├─ Err(AlreadyInitialized) ──────► Pending (rejected), nothing queued
//!        │     ├─ Front ──► seq.push_front(Settle(call))
//!        │     └─ Back  ──► seq.push_back(Settle(call))
//!        └─ gate.is_open() && seq.start() ──► tokio::spawn(drain)
//! ```
//!
//! ## Unsubscribe path
//! ```text
//! Unsubscribe::unsubscribe()
//!   └─ lock state
//!        ├─ flushing ──► seq.push_back(Unsubscribe(id))   (applied after queued work)
//!        └─ idle     ──► registry.remove(id)               (immediate)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use seriate::Emitter;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = Arc::new(Mutex::new(Vec::new()));
//!     let (l1, l2) = (Arc::clone(&log), Arc::clone(&log));
//!
//!     let emitter = Emitter::<(), ()>::builder()
//!         .sync("first", move |_| {
//!             l1.lock().unwrap().push("first");
//!             Ok(())
//!         })
//!         .sync("second", move |_| {
//!             l2.lock().unwrap().push("second");
//!             Ok(())
//!         })
//!         .build()?;
//!
//!     let _ = emitter.call("first", ());
//!     emitter.call("second", ()).await?;
//!
//!     assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::debug;

use crate::core::builder::EmitterBuilder;
use crate::core::config::EmitterConfig;
use crate::core::gate::{InitGate, Placement};
use crate::core::pending::{Pending, Reply};
use crate::core::sequencer::Sequencer;
use crate::error::CallError;
use crate::members::{INITIALIZE, Invoke, Member, MemberKind};
use crate::observers::{Observe, Registry, SubscriptionId};

/// One queued unit of work.
pub(crate) enum Job<A, R> {
    /// Run a member call.
    Settle(Call<A, R>),
    /// Deferred observer removal.
    Unsubscribe(SubscriptionId),
}

/// A member invocation captured with its arguments and reply channel.
pub(crate) struct Call<A, R> {
    pub(crate) member: String,
    pub(crate) invoke: Invoke<A, R>,
    pub(crate) args: A,
    pub(crate) reply: Reply<R>,
}

/// Mutable scheduling state, guarded by one lock.
pub(crate) struct State<A, R> {
    pub(crate) seq: Sequencer<Job<A, R>>,
    pub(crate) gate: InitGate,
}

/// State shared by every emitter handle and the drain loop.
pub(crate) struct Inner<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    pub(crate) cfg: EmitterConfig,
    pub(crate) members: HashMap<String, Member<A, R>>,
    pub(crate) state: Mutex<State<A, R>>,
    pub(crate) registry: Registry<A, R>,
    pub(crate) enabled: AtomicBool,
    pub(crate) idle: Notify,
}

impl<A, R> Inner<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Removes an observer now, or after queued work when a drain is running.
    fn unsubscribe(&self, id: SubscriptionId) {
        let mut state = self.state.lock();
        if state.seq.is_flushing() {
            state.seq.push_back(Job::Unsubscribe(id));
            debug!(emitter = %self.cfg.label, subscription = %id, "unsubscribe deferred until queued work settles");
        } else {
            self.registry.remove(id);
            debug!(emitter = %self.cfg.label, subscription = %id, "unsubscribed");
        }
    }
}

/// Single-flight, strictly ordered wrapper around a fixed set of members.
///
/// `A` is the argument type shared by all members, `R` the result type (also the
/// type of pass-through values). Cloning an `Emitter` is cheap and yields a handle to
/// the same queue.
///
/// ### Runtime
/// The drain loop runs on Tokio: [`Emitter::call`] must be called from within a Tokio
/// runtime, like [`tokio::spawn`].
pub struct Emitter<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    inner: Arc<Inner<A, R>>,
}

impl<A, R> Clone for Emitter<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> Emitter<A, R>
where
    A: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Returns a builder for a new emitter.
    pub fn builder() -> EmitterBuilder<A, R> {
        EmitterBuilder::new()
    }

    /// Creates the emitter from a validated member table.
    pub(crate) fn from_parts(cfg: EmitterConfig, members: HashMap<String, Member<A, R>>) -> Self {
        let gated = members.get(INITIALIZE).is_some_and(Member::is_callable);
        let enabled = AtomicBool::new(cfg.enabled);
        Self {
            inner: Arc::new(Inner {
                cfg,
                members,
                state: Mutex::new(State {
                    seq: Sequencer::new(),
                    gate: InitGate::new(gated),
                }),
                registry: Registry::new(),
                enabled,
                idle: Notify::new(),
            }),
        }
    }

    /// Invokes the member `name` through the queue.
    ///
    /// The call is queued before this returns; the returned [`Pending`] resolves once
    /// the call has run and its observers were notified. Synchronous members run
    /// inside the drain loop too, so their result is also delivered through `Pending`.
    ///
    /// ### Errors (through `Pending`)
    /// - [`CallError::Member`] if the member fails or panics
    /// - [`CallError::AlreadyInitialized`] on a second `initialize` call (nothing queued)
    /// - [`CallError::UnknownMember`] / [`CallError::NotCallable`] for bad names
    /// - [`CallError::Closed`] if the emitter is dropped before the call runs
    pub fn call(&self, name: &str, args: A) -> Pending<R> {
        let invoke = match self.inner.members.get(name) {
            Some(member) => match member.invoker() {
                Some(invoke) => invoke,
                None => return Pending::rejected(CallError::NotCallable { name: name.to_string() }),
            },
            None => return Pending::rejected(CallError::UnknownMember { name: name.to_string() }),
        };

        let (reply, pending) = Pending::channel();
        let job = Job::Settle(Call {
            member: name.to_string(),
            invoke,
            args,
            reply,
        });

        let start = {
            let mut state = self.inner.state.lock();
            let placement = match state.gate.admit(name == INITIALIZE) {
                Ok(placement) => placement,
                Err(e) => {
                    debug!(emitter = %self.inner.cfg.label, member = name, "initialize rejected: already called");
                    return Pending::rejected(e);
                }
            };
            match placement {
                Placement::Front => state.seq.push_front(job),
                Placement::Back => state.seq.push_back(job),
            }
            let open = state.gate.is_open();
            debug!(
                emitter = %self.inner.cfg.label,
                member = name,
                ?placement,
                held = state.gate.is_gated() && !open,
                queued = state.seq.len(),
                "call queued"
            );
            open && state.seq.start()
        };

        if start {
            tokio::spawn(Arc::clone(&self.inner).drain());
        }
        pending
    }

    /// Returns the pass-through value configured under `name`.
    pub fn value(&self, name: &str) -> Option<&R> {
        match self.inner.members.get(name) {
            Some(Member::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns the classification of the member `name`.
    pub fn kind(&self, name: &str) -> Option<MemberKind> {
        self.inner.members.get(name).map(Member::kind)
    }

    /// Returns all member names, sorted.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registers an observer; keep the returned handle to remove it later.
    pub fn subscribe<O>(&self, observer: O) -> Unsubscribe<A, R>
    where
        O: Observe<A, R>,
    {
        self.subscribe_arc(Arc::new(observer))
    }

    /// Registers a shared observer.
    pub fn subscribe_arc(&self, observer: Arc<dyn Observe<A, R>>) -> Unsubscribe<A, R> {
        let name = observer.name();
        let id = self.inner.registry.insert(observer);
        debug!(emitter = %self.inner.cfg.label, subscription = %id, observer = name, "subscribed");
        Unsubscribe {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Turns success-path notifications on, starting with the next settle.
    pub fn enable(&self) {
        self.inner.enabled.store(true, Ordering::Release);
    }

    /// Turns success-path notifications off, starting with the next settle.
    ///
    /// Calls keep running and resolving; failure notifications still go out.
    pub fn disable(&self) {
        self.inner.enabled.store(false, Ordering::Release);
    }

    /// Returns `true` while success-path notifications are on.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    /// Returns `true` while the drain loop is running.
    pub fn is_flushing(&self) -> bool {
        self.inner.state.lock().seq.is_flushing()
    }

    /// Returns `true` once queued calls are allowed to run.
    pub fn is_initialized(&self) -> bool {
        self.inner.state.lock().gate.is_open()
    }

    /// Returns the number of jobs waiting in the queue (the running one excluded).
    pub fn queued(&self) -> usize {
        self.inner.state.lock().seq.len()
    }

    /// Returns the ids of registered observers, ascending.
    ///
    /// Intended for diagnostics and tests.
    pub fn subscriptions(&self) -> Vec<SubscriptionId> {
        self.inner.registry.ids()
    }

    /// Returns `true` if the subscription `id` is registered.
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner.registry.contains(id)
    }

    /// Waits until the drain loop has emptied the queue.
    ///
    /// Returns immediately when no loop is running, including when calls are held
    /// back waiting for `initialize`.
    pub async fn idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if !self.is_flushing() {
                return;
            }
            notified.await;
        }
    }
}

impl<A, R> fmt::Debug for Emitter<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Emitter")
            .field("label", &self.inner.cfg.label)
            .field("members", &self.inner.members.len())
            .field("enabled", &self.inner.is_enabled())
            .field("flushing", &state.seq.is_flushing())
            .field("initialized", &state.gate.is_open())
            .field("queued", &state.seq.len())
            .field("observers", &self.inner.registry.len())
            .finish()
    }
}

/// Handle returned by [`Emitter::subscribe`].
///
/// Dropping the handle leaves the observer registered; call
/// [`Unsubscribe::unsubscribe`] to remove it. The handle does not keep the emitter alive.
pub struct Unsubscribe<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    id: SubscriptionId,
    inner: Weak<Inner<A, R>>,
}

impl<A, R> Unsubscribe<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Returns the subscription id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Removes the observer.
    ///
    /// When the emitter is idle the observer is gone when this returns. While a drain
    /// is running, removal is queued behind the work already waiting, so calls queued
    /// earlier still notify this observer.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.unsubscribe(self.id);
        }
    }
}

impl<A, R> fmt::Debug for Unsubscribe<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}
