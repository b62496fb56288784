use std::borrow::Cow;
use std::collections::HashMap;
use std::future::Future;

use crate::core::config::EmitterConfig;
use crate::core::emitter::Emitter;
use crate::error::{BuildError, MemberError};
use crate::members::Member;

/// Builder for constructing an [`Emitter`] from named members.
///
/// Members are classified when added ([`Member::Value`], [`Member::Sync`],
/// [`Member::Async`]); the set is frozen by [`EmitterBuilder::build`].
pub struct EmitterBuilder<A, R> {
    cfg: EmitterConfig,
    members: Vec<(Cow<'static, str>, Member<A, R>)>,
}

impl<A, R> EmitterBuilder<A, R>
where
    A: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            cfg: EmitterConfig::default(),
            members: Vec::new(),
        }
    }

    /// Replaces the emitter configuration.
    pub fn with_config(mut self, cfg: EmitterConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Adds an already classified member.
    pub fn member(mut self, name: impl Into<Cow<'static, str>>, member: Member<A, R>) -> Self {
        self.members.push((name.into(), member));
        self
    }

    /// Adds a synchronous member.
    pub fn sync<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(A) -> Result<R, MemberError> + Send + Sync + 'static,
    {
        self.member(name, Member::from_fn(f))
    }

    /// Adds an asynchronous member.
    pub fn future<F, Fut>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, MemberError>> + Send + 'static,
    {
        self.member(name, Member::from_async(f))
    }

    /// Adds a pass-through value.
    pub fn value(self, name: impl Into<Cow<'static, str>>, value: R) -> Self {
        self.member(name, Member::value(value))
    }

    /// Validates the member table and builds the emitter.
    ///
    /// ### Errors
    /// - [`BuildError::EmptyName`] if a member name is empty
    /// - [`BuildError::DuplicateMember`] if a name was added twice
    pub fn build(self) -> Result<Emitter<A, R>, BuildError> {
        let mut members = HashMap::with_capacity(self.members.len());
        for (name, member) in self.members {
            if name.is_empty() {
                return Err(BuildError::EmptyName);
            }
            let name = name.into_owned();
            if members.contains_key(&name) {
                return Err(BuildError::DuplicateMember { name });
            }
            members.insert(name, member);
        }
        Ok(Emitter::from_parts(self.cfg, members))
    }
}

impl<A, R> Default for EmitterBuilder<A, R>
where
    A: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
