use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::paths::log_file_path;

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Full-screen mode owns the terminal, so logs go to a file instead.
    File,
}

pub fn target_for(cli: &Cli) -> LogTarget {
    match cli.command {
        Some(Command::Tui { .. }) | None => LogTarget::File,
        Some(_) => LogTarget::Stderr,
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `warn` filter.
pub fn init(target: LogTarget) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let file = match target {
        LogTarget::Stderr => None,
        LogTarget::File => log_file_path().ok().and_then(|path| open_log_file(&path)),
    };

    let _ = match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
        // Without a usable log file, drop events rather than draw over the TUI.
        None if target == LogTarget::File => builder.with_writer(std::io::sink).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
