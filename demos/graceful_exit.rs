//! Coordinated shutdown of two fake resource pools.
//!
//! Run with `cargo run --example graceful_exit`, then press Ctrl-C. The
//! postgres pool closes immediately; the clickhouse pool drains for three
//! seconds against a one-second grace period, so the timeout action forces
//! the exit.

use std::collections::HashMap;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use winddown::{graceful, Operation, ShutdownOptions};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "winddown=debug,info".into()),
        )
        .init();

    let mut ops = HashMap::new();
    ops.insert(
        "postgres".to_string(),
        Operation::new(|_ctx| async {
            tracing::info!("postgres pool closed");
            Ok(())
        }),
    );
    ops.insert(
        "clickhouse".to_string(),
        Operation::new(|_ctx| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Err("clickhouse refused to drain".into())
        }),
    );

    let done = graceful(
        CancellationToken::new(),
        ops,
        ShutdownOptions::new()
            .grace_period(Duration::from_secs(1))
            .on_timeout(|| {
                eprintln!("grace period elapsed, forcing exit");
                std::process::exit(1);
            }),
    );

    println!("running; press Ctrl-C to begin shutdown");
    done.wait().await;
    println!("cleanup finished");
}
