//! # seriate
//!
//! **Seriate** turns a fixed set of named callables into a single-flight,
//! strictly ordered execution pipeline with an observer side-channel.
//!
//! Every call to a member goes through one queue. Calls settle one at a time, in
//! call order, whether the member is synchronous or asynchronous, so a slow call
//! issued first always finishes before a fast call issued after it. Observers see
//! each call's arguments and result (or error) before the caller does.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   caller            caller            caller
//!     │ call("a")       │ call("b")       │ call("initialize")
//!     ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter                                                          │
//! │  - InitGate   (placement: front for initialize, back otherwise)   │
//! │  - Sequencer  (VecDeque<Job>, flushing flag)                      │
//! │  - Registry   (SubscriptionId → Arc<dyn Observe>)                 │
//! │  - enabled    (success-path notification gate)                    │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                     ┌─────────────────────┐
//!                     │ drain loop (tokio)  │  one job at a time
//!                     └──────────┬──────────┘
//!                                ▼
//!         member.run(args) ──► fan-out to observers ──► reply to Pending
//! ```
//!
//! ### Settle
//! ```text
//! Ok(result)  ─► enabled? ─► on_member + on_all (every observer, isolated) ─► Ok(result)
//! Err(error)  ─► on_catch (every observer, isolated, regardless of enabled) ─► Err(Member(error))
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                          |
//! |-------------------|-----------------------------------------------------------------|---------------------------------------------|
//! | **Emitter**       | Queue-backed wrapper around named members.                      | [`Emitter`], [`EmitterBuilder`], [`Pending`]|
//! | **Members**       | Value / sync / async entries, classified once.                  | [`Member`], [`MemberKind`], [`INITIALIZE`]  |
//! | **Observers**     | Per-member, `all` and `catch` hooks with failure isolation.     | [`Observe`], [`Subscription`]               |
//! | **Errors**        | Typed errors for calls, members, observers and building.        | [`CallError`], [`MemberError`]              |
//! | **Configuration** | Per-emitter settings.                                           | [`EmitterConfig`]                           |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use seriate::{Emitter, Subscription};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = Emitter::<u64, u64>::builder()
//!         .future("initialize", |_| async { Ok(0) })
//!         .future("slow", |ms| async move {
//!             tokio::time::sleep(Duration::from_millis(ms)).await;
//!             Ok(ms)
//!         })
//!         .sync("fast", |n| Ok(n + 1))
//!         .build()?;
//!
//!     let sub = emitter.subscribe(Subscription::new().all(|member: &str, result: &u64, _args: &u64| {
//!         println!("{member} -> {result}");
//!         Ok(())
//!     }));
//!
//!     // Queued, but held back until `initialize` runs.
//!     let slow = emitter.call("slow", 20);
//!     let fast = emitter.call("fast", 1);
//!     emitter.call("initialize", 0).await?;
//!
//!     assert_eq!(slow.await?, 20);
//!     assert_eq!(fast.await?, 2);
//!
//!     sub.unsubscribe();
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod members;
mod observers;

// ---- Public re-exports ----

pub use crate::core::{Emitter, EmitterBuilder, EmitterConfig, Pending, Unsubscribe};
pub use error::{BuildError, CallError, MemberError, ObserverError};
pub use members::{AsyncFn, INITIALIZE, Member, MemberKind, SyncFn};
pub use observers::{Observe, Subscription, SubscriptionId};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
