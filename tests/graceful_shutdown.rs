//! End-to-end shutdown coordination driven by real OS signals.
//!
//! Each test uses a distinct signal: delivery is process-wide and the test
//! harness runs these concurrently, so sharing a signal between tests would
//! cross-trigger coordinators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::signal::unix::SignalKind;
use tokio_util::sync::CancellationToken;
use winddown::{graceful, Operation, ShutdownOptions};

/// Send a signal to the current process.
fn raise(signal: libc::c_int) {
    unsafe {
        libc::kill(libc::getpid(), signal);
    }
}

#[tokio::test]
async fn test_signal_runs_operations_and_reports_failures() {
    let mut ops = HashMap::new();
    ops.insert(
        "a".to_string(),
        Operation::new(|_ctx| async { Ok(()) }),
    );
    ops.insert(
        "b".to_string(),
        Operation::new(|_ctx| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err("boom".into())
        }),
    );

    let failures = Arc::new(Mutex::new(Vec::new()));
    let observed = failures.clone();

    let done = graceful(
        CancellationToken::new(),
        ops,
        ShutdownOptions::new()
            .signals([SignalKind::user_defined1()])
            .grace_period(Duration::from_secs(5))
            .on_failure(move |name, err| {
                observed
                    .lock()
                    .unwrap()
                    .push((name.to_string(), err.to_string()));
            }),
    );

    raise(libc::SIGUSR1);

    tokio::time::timeout(Duration::from_secs(2), done.wait())
        .await
        .expect("completion should close after both operations finish");

    assert_eq!(
        failures.lock().unwrap().as_slice(),
        [("b".to_string(), "boom".to_string())]
    );
}

#[tokio::test]
async fn test_timeout_action_fires_while_completion_stays_open() {
    let mut ops = HashMap::new();
    ops.insert(
        "stuck".to_string(),
        Operation::new(|_ctx| async {
            futures::future::pending::<()>().await;
            Ok(())
        }),
    );

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();

    let done = graceful(
        CancellationToken::new(),
        ops,
        ShutdownOptions::new()
            .signals([SignalKind::user_defined2()])
            .grace_period(Duration::from_millis(50))
            .on_timeout(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
    );

    raise(libc::SIGUSR2);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // The stuck operation never returns, so the completion handle stays open.
    assert!(
        tokio::time::timeout(Duration::from_millis(100), done.wait())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_operations_receive_the_caller_token() {
    let ctx = CancellationToken::new();
    ctx.cancel();

    let saw_cancelled = Arc::new(AtomicBool::new(false));
    let flag = saw_cancelled.clone();

    let mut ops = HashMap::new();
    ops.insert(
        "watcher".to_string(),
        Operation::new(move |ctx| async move {
            flag.store(ctx.is_cancelled(), Ordering::SeqCst);
            Ok(())
        }),
    );

    let done = graceful(
        ctx,
        ops,
        ShutdownOptions::new().signals([SignalKind::hangup()]),
    );

    raise(libc::SIGHUP);

    tokio::time::timeout(Duration::from_secs(2), done.wait())
        .await
        .expect("completion should close");

    assert!(saw_cancelled.load(Ordering::SeqCst));
}
