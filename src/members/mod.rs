//! # Emitter members.
//!
//! This module provides the configuration entries an emitter is built from:
//! - [`Member`] - tagged entry (value / sync callable / async callable)
//! - [`MemberKind`] - classification tag
//! - [`SyncFn`], [`AsyncFn`] - shared callable handles
//! - [`INITIALIZE`] - the reserved member name that gates every other call

mod member;

pub use member::{AsyncFn, Member, MemberKind, SyncFn};
pub(crate) use member::Invoke;

/// Reserved member name.
///
/// When a callable member with this name is configured, no other member runs
/// before it, and it can be invoked only once.
pub const INITIALIZE: &str = "initialize";
