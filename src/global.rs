//! Process-wide default logger
//!
//! The default is built lazily on first use: stderr, JSON records, caller
//! `file:line` and thread id enabled. [`init`] installs a different logger,
//! but only before anything has touched the default.

use crate::core::{Logger, LoggerError, Options, Result};
use parking_lot::RwLock;
use std::io;
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn build_default() -> Logger {
    let options = Options::new()
        .with_json(true)
        .with_file_line(true)
        .with_thread_id(true);
    Logger::with_options(io::stderr(), options).unwrap_or_else(|e| {
        eprintln!("[LOGGER WARNING] Falling back to plain default logger: {}", e);
        Logger::new(io::stderr())
    })
}

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT.get_or_init(|| RwLock::new(Arc::new(build_default())))
}

/// Install `logger` as the process-wide default
///
/// Fails with [`LoggerError::AlreadyInitialized`] once a default exists,
/// whether installed here or built lazily by [`logger`].
pub fn init(logger: Logger) -> Result<()> {
    DEFAULT
        .set(RwLock::new(Arc::new(logger)))
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide default logger
///
/// ```
/// let logger = rust_kvlog::global::logger();
/// assert!(logger.options().enable_json);
/// ```
pub fn logger() -> Arc<Logger> {
    slot().read().clone()
}

/// Swap the default logger, returning the previous one
///
/// Callers holding the previous `Arc` keep logging through it.
#[cfg(any(test, feature = "test-support"))]
pub fn replace(logger: Logger) -> Arc<Logger> {
    std::mem::replace(&mut *slot().write(), Arc::new(logger))
}
