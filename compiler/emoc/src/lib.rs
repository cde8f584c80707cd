//! Emo driver: `emo run <file>` and `emo repl`.
//!
//! The binary in `main.rs` only installs logging, calls [`dispatch`] and
//! turns the outcome into an exit code. Everything else lives here so it
//! can be tested without spawning a process.

pub mod commands;

use std::sync::Once;

pub use commands::{dispatch, repl, run_file, run_source, CommandError, RunStatus, USAGE};

static TRACING_INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
