//! # Observer trait.
//!
//! Provides [`Observe`], the extension point for watching every settled call of an
//! [`Emitter`](crate::Emitter).
//!
//! An observer gets three hooks, all optional:
//! - **`on_member`** - the per-member callback, `(member, result, args)`;
//! - **`on_all`** - every successful settle regardless of member;
//! - **`on_catch`** - every failed settle regardless of member, `(member, error, args)`.
//!
//! ## Architecture
//! ```text
//! drain loop ──► settle(call)
//!                  ├─ Ok(result)  ──► [enabled?] ──► observer.on_member() ┐ joined per observer,
//!                  │                                 observer.on_all()    ┘ observers joined together
//!                  └─ Err(error)  ──► observer.on_catch()   (not gated by `enabled`)
//! ```
//!
//! ## Rules
//! - `on_member` and `on_all` for one settle run independently of each other.
//! - An `Err` or a panic from any hook is swallowed (optionally logged) and affects
//!   only that hook; other observers and the caller never see it.
//! - Hooks for one settle finish before the caller's pending result is resolved.
//! - There is no ordering between distinct observers.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use seriate::{MemberError, Observe, ObserverError};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Observe<String, usize> for Audit {
//!     async fn on_all(&self, member: &str, result: &usize, args: &String) -> Result<(), ObserverError> {
//!         println!("{member}({args}) = {result}");
//!         Ok(())
//!     }
//!
//!     async fn on_catch(&self, member: &str, error: &MemberError, _args: &String) -> Result<(), ObserverError> {
//!         println!("{member} failed: {error}");
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

use async_trait::async_trait;

use crate::error::{MemberError, ObserverError};

/// Observer of settled calls.
///
/// `A` is the emitter's argument type, `R` its result type. Every hook defaults to a
/// no-op, so implementors override only what they need.
///
/// ### Implementation requirements
/// - A slow hook stalls the whole queue: the next call waits for it.
/// - Report failures with `Err(ObserverError)`; they are swallowed.
#[async_trait]
pub trait Observe<A, R>: Send + Sync + 'static
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Called after `member` settled successfully (only while the emitter is enabled).
    ///
    /// Implementations dispatch on `member` to get per-member callbacks.
    async fn on_member(&self, member: &str, result: &R, args: &A) -> Result<(), ObserverError> {
        let _ = (member, result, args);
        Ok(())
    }

    /// Called after any member settled successfully (only while the emitter is enabled).
    async fn on_all(&self, member: &str, result: &R, args: &A) -> Result<(), ObserverError> {
        let _ = (member, result, args);
        Ok(())
    }

    /// Called after any member failed, whether or not the emitter is enabled.
    async fn on_catch(&self, member: &str, error: &MemberError, args: &A) -> Result<(), ObserverError> {
        let _ = (member, error, args);
        Ok(())
    }

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
