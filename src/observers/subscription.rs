//! # Closure-backed subscription record.
//!
//! [`Subscription`] is a ready-made [`Observe`] implementation assembled from
//! closures: a map from member name to callback, plus optional `all` and `catch`
//! callbacks.
//!
//! ## Example
//! ```rust
//! use seriate::{ObserverError, Subscription};
//!
//! let sub: Subscription<u32, u32> = Subscription::new()
//!     .on("double", |result: &u32, args: &u32| {
//!         println!("double({args}) = {result}");
//!         Ok(())
//!     })
//!     .all(|member: &str, _result: &u32, _args: &u32| {
//!         println!("{member} settled");
//!         Ok(())
//!     })
//!     .catch(|member: &str, _error, _args: &u32| Err(ObserverError::new(format!("{member} failed"))));
//!
//! assert!(sub.observes("double"));
//! assert!(!sub.observes("triple"));
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{MemberError, ObserverError};
use crate::observers::Observe;

type MemberHook<A, R> = Box<dyn Fn(&R, &A) -> Result<(), ObserverError> + Send + Sync>;
type AllHook<A, R> = Box<dyn Fn(&str, &R, &A) -> Result<(), ObserverError> + Send + Sync>;
type CatchHook<A> = Box<dyn Fn(&str, &MemberError, &A) -> Result<(), ObserverError> + Send + Sync>;

/// Subscription record built from synchronous closures.
///
/// Use a custom [`Observe`] implementation when the callbacks need to await.
pub struct Subscription<A, R> {
    name: &'static str,
    members: HashMap<String, MemberHook<A, R>>,
    all: Option<AllHook<A, R>>,
    catch: Option<CatchHook<A>>,
}

impl<A, R> Subscription<A, R> {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "subscription",
            members: HashMap::new(),
            all: None,
            catch: None,
        }
    }

    /// Sets the name reported in logs.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Registers the callback for `member`, replacing any previous one.
    #[must_use]
    pub fn on<F>(mut self, member: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R, &A) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.members.insert(member.into(), Box::new(f));
        self
    }

    /// Registers the callback for every successful settle.
    #[must_use]
    pub fn all<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &R, &A) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.all = Some(Box::new(f));
        self
    }

    /// Registers the callback for every failed settle.
    #[must_use]
    pub fn catch<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &MemberError, &A) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.catch = Some(Box::new(f));
        self
    }

    /// Returns `true` if a per-member callback is registered for `member`.
    pub fn observes(&self, member: &str) -> bool {
        self.members.contains_key(member)
    }
}

impl<A, R> Default for Subscription<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A, R> Observe<A, R> for Subscription<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    async fn on_member(&self, member: &str, result: &R, args: &A) -> Result<(), ObserverError> {
        match self.members.get(member) {
            Some(hook) => hook(result, args),
            None => Ok(()),
        }
    }

    async fn on_all(&self, member: &str, result: &R, args: &A) -> Result<(), ObserverError> {
        match &self.all {
            Some(hook) => hook(member, result, args),
            None => Ok(()),
        }
    }

    async fn on_catch(&self, member: &str, error: &MemberError, args: &A) -> Result<(), ObserverError> {
        match &self.catch {
            Some(hook) => hook(member, error, args),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
