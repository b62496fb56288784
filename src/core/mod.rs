//! Emitter core: queueing, gating and settlement.
//!
//! The public API from this module is [`Emitter`] (with its [`EmitterBuilder`],
//! [`EmitterConfig`], [`Pending`] and [`Unsubscribe`] companions).
//!
//! Internal modules:
//! - [`sequencer`]: FIFO job queue and the `flushing` flag;
//! - [`gate`]: one-shot `initialize` gate deciding placement and drain start;
//! - [`runner`]: the drain loop and single-call settlement with observer fan-out;
//! - [`emitter`]: shared state, the call path and subscription handles;
//! - [`pending`]: the future returned by every wrapped call.

mod builder;
mod config;
mod emitter;
mod gate;
mod pending;
mod runner;
mod sequencer;

pub use builder::EmitterBuilder;
pub use config::EmitterConfig;
pub use emitter::{Emitter, Unsubscribe};
pub use pending::Pending;

#[cfg(test)]
mod tests;
