//! # Observers of settled calls.
//!
//! This module provides the [`Observe`] trait, the closure-backed [`Subscription`]
//! record, and the registry the emitter keeps them in.
//!
//! ## Architecture
//! ```text
//! Emitter::subscribe(observer) ──► Registry (SubscriptionId → Arc<dyn Observe>)
//!
//! drain loop ──► settle(call) ──► Registry::snapshot()
//!                                     │
//!                                     ├──► Observe::on_member / on_all   (success, while enabled)
//!                                     └──► Observe::on_catch             (failure, always)
//! ```
//!
//! ## Observer types
//! - **Closure records** - [`Subscription`], a map from member name to callback plus `all`/`catch`
//! - **Custom observers** - any type implementing [`Observe`], free to await inside hooks
//! - **LogWriter** - built-in tracing observer (feature `logging`)

mod fanout;
#[cfg(feature = "logging")]
mod log;
mod observe;
mod registry;
mod subscription;

pub(crate) use fanout::{failed, settled};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observe::Observe;
pub(crate) use registry::Registry;
pub use registry::SubscriptionId;
pub use subscription::Subscription;
