//! Log writer module
//!
//! Thread-safe log writing. Every line goes to stdout; when a log
//! file is configured it is opened in append mode and receives a
//! copy of each line, so `/getlog` can replay the history.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Thread-safe log writer
pub struct LogWriter {
    /// Append-mode log file, absent when running stdout-only
    file: Option<Mutex<File>>,
}

impl LogWriter {
    fn new(log_file: Option<&str>) -> io::Result<Self> {
        let file = match log_file {
            Some(path) => Some(Mutex::new(open_log_file(path)?)),
            None => None,
        };

        Ok(Self { file })
    }

    /// Write one line to stdout and, if configured, the log file
    pub fn write_line(&self, message: &str) {
        println!("{message}");
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if the log file cannot be opened.
pub fn init(log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer
///
/// Panics if `init()` has not been called.
pub fn get() -> &'static LogWriter {
    LOG_WRITER
        .get()
        .expect("Log writer not initialized. Call logger::init() first.")
}

/// Check if the log writer has been initialized
pub fn is_initialized() -> bool {
    LOG_WRITER.get().is_some()
}
