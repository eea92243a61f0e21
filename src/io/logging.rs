use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `chipselect=debug`)
pub const LOG_ENV: &str = "CHIPSELECT_LOG";

/// Where log output goes
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Headless commands: stderr
    Stderr,
    /// Append to a file (the TUI owns the terminal)
    File(&'a Path),
    /// No subscriber at all
    Off,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global tracing subscriber. Safe to call once per process;
/// later calls are ignored.
pub fn init_logging(target: LogTarget<'_>) -> std::io::Result<()> {
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        LogTarget::File(path) => {
            let file: File = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
    Ok(())
}
