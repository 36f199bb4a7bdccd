//! Tracing subscriber setup for the CLI
//!
//! `serve` owns stdout for the MCP protocol, so its logs go to a file. Every
//! other command logs to stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;

/// Directory under the home directory holding the default server log
pub const LOG_DIR_NAME: &str = ".qrsave";
/// File name of the default server log
pub const LOG_FILE_NAME: &str = "mcp.log";

/// A thread-safe writer that flushes and syncs every write to disk.
///
/// Used for the server log so a client that kills the server still leaves a
/// complete log behind.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use qrsave_cli::logging::FileWriterGuard;
///
/// let file = File::create("log.txt").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock was poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Log level picked from the verbosity flags
pub fn log_level(quiet: bool, debug: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// `~/.qrsave/mcp.log`, or `./.qrsave/mcp.log` when there is no home directory
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_DIR_NAME)
        .join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// With `log_file` set, logs are appended to that file without ANSI colors;
/// if it cannot be opened they fall back to stderr.
pub fn init_logging(level: Level, log_file: Option<&Path>) {
    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(level)
            .init();
        return;
    };

    match open_log_file(path) {
        Ok(file) => {
            let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
            tracing_subscriber::fmt()
                .with_writer(move || guard.clone())
                .with_max_level(level)
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_max_level(level)
                .init();
            tracing::warn!(
                "Failed to open log file {}, using stderr: {}",
                path.display(),
                e
            );
        }
    }
}
