//! Optional structured diagnostics (feature `otel`).
//!
//! Installs a `tracing` fmt subscriber on stderr when `ECS_BIND_TRACING_FMT=1`.
//! The filter comes from `RUST_LOG` and defaults to `warn`.

use std::env;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;

static INIT: OnceCell<()> = OnceCell::new();

fn tracing_fmt_enabled_env() -> bool {
    env::var("ECS_BIND_TRACING_FMT").ok().as_deref() == Some("1")
}

/// Returns true when this call installed the global subscriber.
pub fn telemetry_init() -> bool {
    if INIT.get().is_some() || !tracing_fmt_enabled_env() {
        return false;
    }

    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::new(filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("ecs-bind: telemetry init skipped (global subscriber already set)");
        return false;
    }

    let _ = INIT.set(());
    true
}
