//! Shutdown orchestration
//!
//! # Data Flow
//! ```text
//! Signal received → arm grace timer → fan out operations concurrently
//!     → observe failures → disarm timer → close completion signal
//! ```
//!
//! # Design Decisions
//! - Operations receive the caller's cancellation token, never one derived
//!   from the grace timer; a slow operation keeps running after the timeout
//!   action fires
//! - The timeout action races against operation completion; disarming the
//!   timer after the barrier is best-effort, not a suppression guarantee
//! - One coordinator instance handles exactly one shutdown sequence:
//!   Idle → Armed → SignalReceived → CleaningUp → Done

use std::collections::HashMap;

use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::operation::Operation;
use crate::options::ShutdownOptions;
use crate::signal;

/// Handle for awaiting the end of shutdown cleanup.
///
/// Resolves exactly once, after every operation has returned following a
/// signal. If an operation never returns, the handle never resolves; the
/// grace-period timeout action is the escape hatch for that case.
pub struct Completion {
    rx: oneshot::Receiver<()>,
}

impl Completion {
    /// Block until all cleanup operations have finished.
    pub async fn wait(self) {
        let _ = self.rx.await;
    }
}

/// Coordinate graceful shutdown for a set of named cleanup operations.
///
/// Registers handlers for the configured termination signals and returns
/// immediately with a [`Completion`] handle; all further work happens in the
/// background. When the first matching signal arrives, every operation in
/// `ops` runs concurrently with a clone of `ctx`. Once all of them have
/// returned, the handle resolves. If the grace period elapses first, the
/// configured timeout action runs exactly once while the remaining operations
/// continue in place.
///
/// Operation failures are reported to the failure observer with the
/// operation's name; they never abort sibling operations and the coordinator
/// itself has no error return. A registration failure leaves the coordinator
/// disarmed (logged at error severity, handle never resolves).
///
/// Must be called from within a Tokio runtime.
pub fn graceful(
    ctx: CancellationToken,
    ops: HashMap<String, Operation>,
    options: ShutdownOptions,
) -> Completion {
    let (tx, rx) = oneshot::channel();

    // Register before returning so a signal sent right after this call is
    // already caught.
    let mut streams = match signal::subscribe(&options.signals) {
        Ok(streams) => streams,
        Err(err) => {
            tracing::error!(error = %err, "shutdown coordinator is disarmed");
            Vec::new()
        }
    };
    let kinds = options.signals.clone();

    tokio::spawn(async move {
        let index = signal::recv_any(&mut streams).await;
        tracing::info!(signal = ?kinds[index], "termination signal received, starting cleanup");

        run_cleanup(ctx, ops, options).await;

        // The receiver may already be gone; delivery is best-effort.
        let _ = tx.send(());
    });

    Completion { rx }
}

/// Post-signal phase: arm the grace timer, run all operations to completion,
/// report failures, then disarm the timer.
async fn run_cleanup(
    ctx: CancellationToken,
    ops: HashMap<String, Operation>,
    options: ShutdownOptions,
) {
    let ShutdownOptions {
        grace_period,
        on_timeout,
        mut on_failure,
        ..
    } = options;

    let timer = tokio::spawn(async move {
        tokio::time::sleep(grace_period).await;
        tracing::warn!(?grace_period, "grace period elapsed with operations still running");
        on_timeout();
    });

    let mut workers = JoinSet::new();
    for (name, op) in ops {
        let ctx = ctx.clone();
        workers.spawn(async move { (name, op.invoke(ctx).await) });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((_, Ok(()))) => {}
            Ok((name, Err(err))) => on_failure(&name, err),
            Err(err) => tracing::error!(error = %err, "cleanup worker terminated abnormally"),
        }
    }

    // Best-effort disarm: the timer may already have fired, in which case
    // aborting has no effect.
    timer.abort();
}
