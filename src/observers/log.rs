//! # LogWriter — simple settle logger
//!
//! A minimal observer that writes every settled call to `tracing`.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! INFO [settled] member="first" result=1 args=()
//! WARN [failed] member="save" error=member failed: disk full args="a.txt"
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{MemberError, ObserverError};
use crate::observers::Observe;

/// Settle writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<A, R> Observe<A, R> for LogWriter
where
    A: Debug + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    async fn on_all(&self, member: &str, result: &R, args: &A) -> Result<(), ObserverError> {
        info!(member, ?result, ?args, "[settled]");
        Ok(())
    }

    async fn on_catch(&self, member: &str, error: &MemberError, args: &A) -> Result<(), ObserverError> {
        warn!(member, %error, ?args, "[failed]");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
