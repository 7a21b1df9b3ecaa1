//! Caller location, thread identity and stack dumps

use std::backtrace::Backtrace;
use std::cell::Cell;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

/// Turns the call site of a log method into the `file` field
///
/// Resolution only happens for records that pass the level filter.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, location: &Location<'_>) -> String;
}

/// Renders `file:line`, optionally stripping a path prefix
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    strip_prefix: Option<String>,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip `prefix` from file paths that start with it
    #[must_use]
    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }
}

impl CallerResolver for LocationResolver {
    fn resolve(&self, location: &Location<'_>) -> String {
        let file = location.file();
        let file = self
            .strip_prefix
            .as_deref()
            .and_then(|prefix| file.strip_prefix(prefix))
            .map(|rest| rest.trim_start_matches(['/', '\\']))
            .unwrap_or(file);
        format!("{}:{}", file, location.line())
    }
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Cached so each thread pays for the counter increment once
thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
}

/// Small, stable, non-zero id of the calling thread
///
/// Ids are handed out in order of first use and never reused within a process.
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|cached| {
        let id = cached.get();
        if id != 0 {
            return id;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        cached.set(id);
        id
    })
}

/// Stack trace of the calling thread as text
pub fn stack() -> String {
    Backtrace::force_capture().to_string()
}
