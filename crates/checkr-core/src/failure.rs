// ── Poll failure handling ──
//
// A failed poll is reported here and then forgotten: the published state
// stays as it was and the loop keeps running.

use tracing::warn;

use crate::error::CoreError;

/// Receives every failed poll cycle.
pub trait FailureHandler: Send + Sync + 'static {
    fn on_failure(&self, error: &CoreError);
}

/// Default handler: log at `warn` and carry on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFailures;

impl FailureHandler for LogFailures {
    fn on_failure(&self, error: &CoreError) {
        warn!(error = %error, "poll failed, keeping previous state");
    }
}

/// Adapter turning a closure into a [`FailureHandler`]. See [`handler_fn`].
#[derive(Debug, Clone, Copy)]
pub struct HandlerFn<F>(F);

/// Wrap a closure as a [`FailureHandler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&CoreError) + Send + Sync + 'static,
{
    HandlerFn(f)
}

impl<F> FailureHandler for HandlerFn<F>
where
    F: Fn(&CoreError) + Send + Sync + 'static,
{
    fn on_failure(&self, error: &CoreError) {
        (self.0)(error);
    }
}
