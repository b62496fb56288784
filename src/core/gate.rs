//! # Initialization gate.
//!
//! Decides where a call goes in the queue and whether draining may begin.
//!
//! ```text
//! admit("initialize")  initialized? ── yes ─► Err(AlreadyInitialized)   (nothing queued)
//!                           └─ no ─► initialized = true, Placement::Front
//!
//! admit(other)         gated? ── no ─► initialized = true
//!                      Placement::Back
//!
//! then: drain starts only if is_open() and the sequencer was idle
//! ```
//!
//! ## Rules
//! - `gated` is fixed at build time: a callable `initialize` member exists.
//! - `initialized` never goes back to `false`.
//! - While gated and not yet initialized, calls queue up but nothing drains.

use crate::error::CallError;

/// Where an admitted job goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Front,
    Back,
}

/// One-shot `initialize` gate.
#[derive(Debug)]
pub(crate) struct InitGate {
    gated: bool,
    initialized: bool,
}

impl InitGate {
    /// Creates the gate; `gated` is `true` when a callable `initialize` is configured.
    pub(crate) fn new(gated: bool) -> Self {
        Self {
            gated,
            initialized: false,
        }
    }

    /// Admits one call and returns its placement.
    pub(crate) fn admit(&mut self, is_initialize: bool) -> Result<Placement, CallError> {
        if is_initialize {
            if self.initialized {
                return Err(CallError::AlreadyInitialized);
            }
            self.initialized = true;
            return Ok(Placement::Front);
        }
        if !self.gated {
            self.initialized = true;
        }
        Ok(Placement::Back)
    }

    /// Returns `true` once queued work may run.
    pub(crate) fn is_open(&self) -> bool {
        self.initialized
    }

    pub(crate) fn is_gated(&self) -> bool {
        self.gated
    }
}
