//! OS signal subscription
//!
//! This module installs handlers for the configured termination signals and
//! resolves the first delivered one into a single shutdown trigger. The
//! listener is single-shot: signals arriving while cleanup is already running
//! are not handled separately (no escalation, no second-signal force-kill).
//!
//! Registration is process-global state. Handlers are installed once per
//! coordination run and are not torn down after the trigger fires; tokio
//! keeps them for the life of the process.

use std::io;

use thiserror::Error;
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Failure to install a handler for one of the configured signals.
#[derive(Debug, Error)]
#[error("failed to register handler for signal {kind:?}")]
pub struct SignalError {
    kind: SignalKind,
    #[source]
    source: io::Error,
}

/// Install a handler for every signal in `kinds`, in order.
///
/// Fails on the first kind that cannot be registered.
pub(crate) fn subscribe(kinds: &[SignalKind]) -> Result<Vec<Signal>, SignalError> {
    kinds
        .iter()
        .map(|&kind| signal(kind).map_err(|source| SignalError { kind, source }))
        .collect()
}

/// Wait until any of the subscribed signals is delivered, returning its index
/// into the original signal set.
///
/// An empty set never resolves.
pub(crate) async fn recv_any(streams: &mut [Signal]) -> usize {
    if streams.is_empty() {
        return futures::future::pending().await;
    }

    let recvs: Vec<_> = streams.iter_mut().map(|s| Box::pin(s.recv())).collect();
    let (_, index, _) = futures::future::select_all(recvs).await;
    index
}
