//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`] centralized settings for one emitter instance.
//!
//! Config is used once, at build time:
//! `Emitter::builder().with_config(config)...build()`.

use std::borrow::Cow;

/// Per-emitter settings.
///
/// ## Field semantics
/// - `label`: Name attached to every log line and settle span of this emitter
/// - `enabled`: Initial state of the success-path observer gate
/// - `log_observer_errors`: Whether swallowed observer errors/panics are logged
///
/// ## Notes
/// All fields are public for flexibility; the emitter copies them at build time.
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Name used in logs and in the `emitter.settle` span.
    pub label: Cow<'static, str>,

    /// Whether observers are notified of successful settles right after construction.
    ///
    /// Toggle later with [`Emitter::enable`](crate::Emitter::enable) /
    /// [`Emitter::disable`](crate::Emitter::disable). Failure notifications ignore it.
    pub enabled: bool,

    /// Whether observer errors and panics are logged at `warn` before being dropped.
    pub log_observer_errors: bool,
}

impl EmitterConfig {
    /// Returns the default config with a custom label.
    pub fn labeled(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `label = "emitter"`
    /// - `enabled = true`
    /// - `log_observer_errors = true`
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("emitter"),
            enabled: true,
            log_observer_errors: true,
        }
    }
}
