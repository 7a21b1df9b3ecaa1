//! # rust_kvlog
//!
//! A leveled key/value logger with syslog severities.
//!
//! ## Features
//!
//! - **Eight levels**: `EMERG` through `DEBUG`, filtered by an atomic threshold
//! - **Structured records**: argument lists become sorted JSON objects
//! - **Plain text**: `[timestamp] LEVEL message` lines with a configurable template
//! - **Caller info**: optional `file:line` and thread id on every record
//! - **Thread Safe**: one line per write, never interleaved
//!
//! ## Example
//!
//! ```
//! use rust_kvlog::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .sink(sink.clone())
//!     .json(true)
//!     .build()
//!     .unwrap();
//!
//! logger.info(kv!["user", "alice", "action", "login"]);
//! assert!(sink.contents().ends_with("INFO {\"action\":\"login\",\"user\":\"alice\"}\n"));
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        is_nil, Args, ErrorLike, FieldValue, Level, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, Options, Record, Result, TimestampFormat,
    };
    pub use crate::kv;
    pub use crate::sinks::{FileSink, MemorySink};
}

pub use crate::core::{
    current_thread_id, is_nil, stack, Args, CallerResolver, ErrorLike, FieldValue, Level,
    LineFormat, LocationResolver, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Options,
    Payload, Record, Result, Sink, TimestampFormat,
};
pub use crate::sinks::{FileSink, MemorySink};
