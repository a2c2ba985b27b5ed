//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the demo output.

use tracing_subscriber::EnvFilter;

/// Set `NATIVECALL_LOG_JSON=true` for JSON lines.
pub const LOG_JSON_ENV: &str = "NATIVECALL_LOG_JSON";

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "nativecall=debug"
    } else {
        "nativecall=info"
    };

    let json_logging = std::env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}
