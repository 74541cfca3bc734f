//! Configuration for one shutdown coordination run
//!
//! Options are resolved once, before signal monitoring begins, and stay fixed
//! for the lifetime of the run. Every setter is chainable and consuming;
//! calling the same setter twice keeps the later value. Unset options keep
//! the documented defaults.

use std::time::Duration;

use tokio::signal::unix::SignalKind;

use crate::operation::OpError;

/// Grace period granted to cleanup operations before the timeout action runs.
///
/// Two seconds covers the common case of closing pooled connections while
/// still bounding shutdown for supervisors (systemd, Kubernetes) that send a
/// follow-up SIGKILL on their own schedule.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(2);

pub(crate) type TimeoutAction = Box<dyn FnOnce() + Send>;
pub(crate) type FailureObserver = Box<dyn FnMut(&str, OpError) + Send>;

/// Options controlling one [`graceful`](crate::graceful) invocation.
///
/// | Option | Effect | Default |
/// |---|---|---|
/// | [`signals`](Self::signals) | which signals trigger shutdown | SIGINT, SIGTERM, SIGHUP |
/// | [`grace_period`](Self::grace_period) | time allowed for cleanup | 2 seconds |
/// | [`on_timeout`](Self::on_timeout) | runs when the grace period elapses | no-op |
/// | [`on_failure`](Self::on_failure) | runs once per failing operation | logs at error severity |
pub struct ShutdownOptions {
    pub(crate) signals: Vec<SignalKind>,
    pub(crate) grace_period: Duration,
    pub(crate) on_timeout: TimeoutAction,
    pub(crate) on_failure: FailureObserver,
}

impl Default for ShutdownOptions {
    fn default() -> Self {
        Self {
            signals: vec![
                SignalKind::interrupt(),
                SignalKind::terminate(),
                SignalKind::hangup(),
            ],
            grace_period: DEFAULT_GRACE_PERIOD,
            on_timeout: Box::new(|| {}),
            on_failure: Box::new(|name, err| {
                tracing::error!(operation = name, error = %err, "cleanup operation failed");
            }),
        }
    }
}

impl ShutdownOptions {
    /// Create options with every setting at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of OS signals that trigger shutdown.
    ///
    /// Only the first delivered matching signal starts the sequence; an empty
    /// set leaves the coordinator armed forever without firing.
    pub fn signals<I>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = SignalKind>,
    {
        self.signals = signals.into_iter().collect();
        self
    }

    /// Set the grace period between signal receipt and the timeout action.
    pub fn grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Set the action run when the grace period elapses with operations still
    /// outstanding.
    ///
    /// Runs at most once per coordination run. Commonly a forced process
    /// exit; in-flight operations are not cancelled when it fires.
    pub fn on_timeout<F>(mut self, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_timeout = Box::new(action);
        self
    }

    /// Set the observer invoked once per operation that returns an error,
    /// with the operation's name and error.
    ///
    /// The default logs both at error severity through `tracing`.
    pub fn on_failure<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&str, OpError) + Send + 'static,
    {
        self.on_failure = Box::new(observer);
        self
    }
}
