//! Cleanup operation types
//!
//! An [`Operation`] is a named unit of cleanup work, such as closing a
//! connection pool or flushing a write-behind buffer. Operations are
//! registered under a name in a `HashMap` and each is invoked exactly once,
//! concurrently with its siblings, after a termination signal arrives.
//! Duplicate names collide under normal map semantics: the last insert wins.

use std::future::Future;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// Error produced by a failing cleanup operation.
///
/// Operations carry arbitrary caller-defined errors, so this is a boxed
/// `std::error::Error` rather than a concrete enum.
pub type OpError = Box<dyn std::error::Error + Send + Sync + 'static>;

type OpFn = Box<dyn FnOnce(CancellationToken) -> BoxFuture<'static, Result<(), OpError>> + Send>;

/// A named unit of cleanup work invoked once during shutdown.
///
/// The wrapped closure receives the caller-supplied [`CancellationToken`] and
/// resolves to `Ok(())` on success or an [`OpError`] on failure. The token is
/// the one passed to [`graceful`](crate::graceful), never one derived from
/// the grace timer; cancelling slow operations is the caller's decision.
pub struct Operation {
    run: OpFn,
}

impl Operation {
    /// Wrap an async closure as a shutdown operation.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use winddown::Operation;
    ///
    /// let op = Operation::new(|_ctx| async {
    ///     // release the resource here
    ///     Ok(())
    /// });
    /// ```
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), OpError>> + Send + 'static,
    {
        Self {
            run: Box::new(move |ctx| Box::pin(f(ctx))),
        }
    }

    /// Consume the operation, producing its future.
    pub(crate) fn invoke(self, ctx: CancellationToken) -> BoxFuture<'static, Result<(), OpError>> {
        (self.run)(ctx)
    }
}
