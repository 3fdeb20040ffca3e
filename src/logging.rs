//! Opt-in log file for hosts that do not install their own subscriber.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Env var naming the log file. Logging stays off when it is unset.
pub const LOG_ENV_VAR: &str = "USERFLOW_LOG";

const DEFAULT_DIRECTIVE: &str = "userflow=info";

/// Append this crate's logs to the file named by `USERFLOW_LOG`.
///
/// `RUST_LOG` overrides the default `userflow=info` filter. Returns the log
/// path, or `None` when the variable is unset, the file cannot be opened,
/// or the host already installed a global subscriber.
pub fn init_tracing() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var_os(LOG_ENV_VAR)?);
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(file)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
