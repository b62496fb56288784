//! Error types used by the emitter, its members and its observers.
//!
//! This module defines the error enums that cross the crate boundary:
//!
//! - [`CallError`] — why a [`Pending`](crate::Pending) call did not produce a value.
//! - [`MemberError`] — failures raised by (or caught from) a member callable.
//! - [`ObserverError`] — failures reported by observer callbacks (never propagated).
//! - [`BuildError`] — configuration rejected by [`EmitterBuilder::build`](crate::EmitterBuilder::build).
//!
//! [`CallError`] and [`MemberError`] provide helper methods (`as_label`, `as_message`)
//! for logging/metrics.

use std::any::Any;

use thiserror::Error;

/// # Errors produced by member execution.
///
/// A member returns `Err(MemberError::Fail { .. })` to signal failure. Panics
/// inside a member are caught by the drain loop and surfaced as
/// [`MemberError::Panicked`]; the queue keeps running either way.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    /// Member reported a failure.
    #[error("member failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Member panicked while running; the panic was caught.
    #[error("member panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl MemberError {
    /// Shorthand for [`MemberError::Fail`].
    ///
    /// # Example
    /// ```
    /// use seriate::MemberError;
    ///
    /// let err = MemberError::fail("disk full");
    /// assert_eq!(err.to_string(), "member failed: disk full");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        MemberError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            MemberError::Fail { .. } => "member_failed",
            MemberError::Panicked { .. } => "member_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            MemberError::Fail { error } => format!("error: {error}"),
            MemberError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// # Errors observed by the caller of a wrapped member.
///
/// Only [`CallError::Member`] and [`CallError::AlreadyInitialized`] come from the
/// queueing algorithm itself; the remaining variants describe lookups by name and
/// an emitter that went away with the call still queued.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The member ran and failed.
    #[error(transparent)]
    Member(#[from] MemberError),

    /// `initialize` was invoked a second time.
    #[error("initialize() can only be called once")]
    AlreadyInitialized,

    /// No member with this name was configured.
    #[error("unknown member {name:?}")]
    UnknownMember {
        /// Requested member name.
        name: String,
    },

    /// The member is a pass-through value, not a callable.
    #[error("member {name:?} is a value, not a callable")]
    NotCallable {
        /// Requested member name.
        name: String,
    },

    /// The emitter was dropped before the call settled.
    #[error("emitter dropped before the call settled")]
    Closed,
}

impl CallError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use seriate::CallError;
    ///
    /// assert_eq!(CallError::AlreadyInitialized.as_label(), "call_already_initialized");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CallError::Member(_) => "call_member_failed",
            CallError::AlreadyInitialized => "call_already_initialized",
            CallError::UnknownMember { .. } => "call_unknown_member",
            CallError::NotCallable { .. } => "call_not_callable",
            CallError::Closed => "call_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CallError::Member(e) => e.as_message(),
            CallError::AlreadyInitialized => "initialize() can only be called once".to_string(),
            CallError::UnknownMember { name } => format!("unknown member: {name}"),
            CallError::NotCallable { name } => format!("not callable: {name}"),
            CallError::Closed => "emitter closed".to_string(),
        }
    }

    /// Returns the member error when the call failed inside the member.
    pub fn as_member(&self) -> Option<&MemberError> {
        match self {
            CallError::Member(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure reported by an observer callback.
///
/// Observer failures are swallowed at the point of the single callback that
/// produced them (and optionally logged); they never reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("observer failed: {error}")]
pub struct ObserverError {
    /// The underlying error message.
    pub error: String,
}

impl ObserverError {
    /// Creates an observer error from a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// # Errors produced while building an emitter.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The same member name was configured twice.
    #[error("member {name:?} configured more than once")]
    DuplicateMember {
        /// Offending member name.
        name: String,
    },

    /// A member was configured with an empty name.
    #[error("member name must not be empty")]
    EmptyName,
}

/// Renders a caught panic payload as text.
pub(crate) fn panic_info(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
