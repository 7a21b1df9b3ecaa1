//! Main logger implementation

use super::{
    caller::{current_thread_id, CallerResolver, LocationResolver},
    error::{LoggerError, Result},
    level::Level,
    metrics::LoggerMetrics,
    nil::ErrorLike,
    options::Options,
    record_builder::{Args, Payload},
    serializer::{self, LineFormat},
    timestamp::TimestampFormat,
    value::{FieldValue, Record},
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Destination of rendered lines
pub type Sink = Box<dyn Write + Send>;

/// Field holding the caller's `file:line`
pub const FILE_KEY: &str = "file";
/// Field holding the calling thread's id
pub const THREAD_ID_KEY: &str = "thread_id";
/// Field holding the timestamp in JSON-log mode
pub const TIMESTAMP_KEY: &str = "timestamp";
/// Field holding the level name in JSON-log mode
pub const LEVEL_KEY: &str = "level";

/// Leveled key/value logger writing to a single sink
///
/// The threshold lives in an atomic and can be changed from any thread
/// while others are logging. Each line reaches the sink with one write
/// under a mutex, so lines from concurrent calls never interleave.
///
/// # Example
///
/// ```
/// use rust_kvlog::{kv, Level, Logger, MemorySink, Options};
///
/// let sink = MemorySink::new();
/// let logger = Logger::with_options(sink.clone(), Options::new().with_json(true)).unwrap();
///
/// logger.warning(kv!["name", "vidar", "age", 18]);
/// assert!(sink.contents().ends_with("WARNING {\"age\":18,\"name\":\"vidar\"}\n"));
///
/// logger.set_level(Level::Error);
/// logger.warning(kv!["dropped", true]);
/// assert_eq!(sink.lines().len(), 1);
/// ```
pub struct Logger {
    sink: Mutex<Sink>,
    level: AtomicU8,
    options: Options,
    line_format: LineFormat,
    resolver: Arc<dyn CallerResolver>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with default options
    #[must_use]
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
            level: AtomicU8::new(Level::default().as_u8()),
            options: Options::default(),
            line_format: LineFormat::default(),
            resolver: Arc::new(LocationResolver::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a logger from an options snapshot
    ///
    /// Fails when `options.log_format` is not a valid line template or
    /// `options.time_format` is a custom pattern chrono cannot render.
    pub fn with_options<W: Write + Send + 'static>(sink: W, options: Options) -> Result<Self> {
        Self::from_parts(Box::new(sink), options, Arc::new(LocationResolver::new()))
    }

    fn from_parts(
        sink: Sink,
        options: Options,
        resolver: Arc<dyn CallerResolver>,
    ) -> Result<Self> {
        let line_format = LineFormat::parse(&options.log_format)?;
        options.time_format.validate()?;
        Ok(Self {
            sink: Mutex::new(sink),
            level: AtomicU8::new(options.level.as_u8()),
            options,
            line_format,
            resolver,
            metrics: LoggerMetrics::new(),
        })
    }

    /// Current threshold
    #[inline]
    pub fn level(&self) -> Level {
        Level::from_u8_or_default(self.level.load(Ordering::Relaxed))
    }

    /// Change the threshold; applies to every call that starts afterwards
    #[inline]
    pub fn set_level(&self, level: Level) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Change the threshold from a raw syslog value
    ///
    /// Values outside 0-7 fall back to `Informational`. Returns the level applied.
    pub fn set_level_raw(&self, value: u8) -> Level {
        let level = Level::from_u8_or_default(value);
        self.set_level(level);
        level
    }

    /// Whether a call at `level` would be written
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level.is_enabled(self.level())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn line_format(&self) -> &LineFormat {
        &self.line_format
    }

    pub fn time_format(&self) -> &TimestampFormat {
        &self.options.time_format
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Write one plain-text line for `message`
    ///
    /// The level filter is not applied here. One trailing newline of
    /// `message` is dropped and exactly one is written after the line.
    pub fn output(&self, time: DateTime<Utc>, level: Level, message: &str) -> Result<()> {
        let line = self.plain_line(time, level, message);
        self.write_line(&line).map_err(|e| {
            self.metrics.record_write_failure();
            write_error(e)
        })
    }

    fn plain_line(&self, time: DateTime<Utc>, level: Level, message: &str) -> String {
        let timestamp = self.options.time_format.format(&time);
        let mut line = self
            .line_format
            .render(&timestamp, level, serializer::trim_newline(message));
        line.push('\n');
        line
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let result = {
            let mut sink = self.sink.lock();
            sink.write_all(line.as_bytes()).and_then(|()| sink.flush())
        };
        if result.is_ok() {
            self.metrics.record_written();
        }
        result
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()?;
        Ok(())
    }

    /// Log `args` at `level`
    #[track_caller]
    pub fn log(&self, level: Level, args: impl Into<Args>) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, args.into(), Location::caller());
    }

    /// Log pre-formatted text at `level` under the `message` key
    ///
    /// The arguments are only formatted when the level is enabled.
    #[track_caller]
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, Args::Message(fmt::format(args)), Location::caller());
    }

    fn emit(&self, level: Level, args: Args, location: &Location<'_>) {
        let now = Utc::now();
        let line = match args.build(self.options.structured()) {
            Payload::Text(text) => self.plain_line(now, level, &text),
            Payload::Record(mut record) => {
                self.inject(&mut record, location);
                if self.options.json_log {
                    record.insert(TIMESTAMP_KEY, self.options.time_format.format(&now));
                    record.insert(LEVEL_KEY, level.name());
                    let mut line = self.encode(&record);
                    line.push('\n');
                    line
                } else {
                    let json = self.encode(&record);
                    self.plain_line(now, level, &json)
                }
            }
        };

        if let Err(e) = self.write_line(&line) {
            let previous = self.metrics.record_write_failure();
            if should_alert(previous) {
                eprintln!(
                    "[LOGGER ERROR] Failed to write {} record ({} failures so far): {}",
                    level,
                    previous + 1,
                    write_error(e)
                );
            }
        }
    }

    fn inject(&self, record: &mut Record, location: &Location<'_>) {
        if self.options.enable_file_line {
            record.insert(FILE_KEY, self.resolver.resolve(location));
        }
        if self.options.enable_thread_id {
            record.insert(THREAD_ID_KEY, current_thread_id());
        }
    }

    fn encode(&self, record: &Record) -> String {
        let (json, encoded) = serializer::encode_or_fallback(record);
        if !encoded {
            self.metrics.record_marshal_failure();
        }
        json
    }

    #[track_caller]
    #[inline]
    pub fn emerg(&self, args: impl Into<Args>) {
        self.log(Level::Emergency, args);
    }

    #[track_caller]
    #[inline]
    pub fn alert(&self, args: impl Into<Args>) {
        self.log(Level::Alert, args);
    }

    #[track_caller]
    #[inline]
    pub fn crit(&self, args: impl Into<Args>) {
        self.log(Level::Critical, args);
    }

    #[track_caller]
    #[inline]
    pub fn err(&self, args: impl Into<Args>) {
        self.log(Level::Error, args);
    }

    #[track_caller]
    #[inline]
    pub fn warning(&self, args: impl Into<Args>) {
        self.log(Level::Warning, args);
    }

    #[track_caller]
    #[inline]
    pub fn notice(&self, args: impl Into<Args>) {
        self.log(Level::Notice, args);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, args: impl Into<Args>) {
        self.log(Level::Informational, args);
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, args: impl Into<Args>) {
        self.log(Level::Debug, args);
    }

    #[track_caller]
    #[inline]
    pub fn emergf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Emergency, args);
    }

    #[track_caller]
    #[inline]
    pub fn alertf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Alert, args);
    }

    #[track_caller]
    #[inline]
    pub fn critf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Critical, args);
    }

    #[track_caller]
    #[inline]
    pub fn errf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Error, args);
    }

    #[track_caller]
    #[inline]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Warning, args);
    }

    #[track_caller]
    #[inline]
    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Notice, args);
    }

    #[track_caller]
    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Informational, args);
    }

    #[track_caller]
    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Debug, args);
    }

    /// Log `err` at `Error` level unless it is nil
    ///
    /// Returns `true` when `err` carried an error. The record holds the
    /// message under `error` plus `context`, normalized like any argument list.
    ///
    /// ```
    /// use rust_kvlog::{kv, Logger, MemorySink, Options};
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::with_options(sink.clone(), Options::new().with_json(true)).unwrap();
    ///
    /// let ok: Result<(), std::io::Error> = Ok(());
    /// assert!(!logger.not_nil(&ok, kv![]));
    ///
    /// let failed: Result<(), std::io::Error> = Err(std::io::Error::other("invalid args"));
    /// assert!(logger.not_nil(&failed, kv!["Userid", "123456"]));
    /// assert!(sink.contents().contains(r#"ERR {"Userid":"123456","error":"invalid args"}"#));
    /// ```
    #[track_caller]
    pub fn not_nil<E: ErrorLike + ?Sized>(&self, err: &E, context: Vec<FieldValue>) -> bool {
        if err.is_nil() {
            return false;
        }
        if !self.enabled(Level::Error) {
            return true;
        }
        let Some(message) = err.failure_message() else {
            return false;
        };
        let args = Args::ErrorWithContext {
            error: FieldValue::Error(message),
            context,
        };
        self.emit(Level::Error, args, Location::caller());
        true
    }

    /// Inverse of [`not_nil`](Self::not_nil): `true` when `err` is nil,
    /// otherwise logs it and returns `false`
    #[track_caller]
    pub fn is_nil_or_log<E: ErrorLike + ?Sized>(&self, err: &E, context: Vec<FieldValue>) -> bool {
        !self.not_nil(err, context)
    }

    #[deprecated(since = "0.1.0", note = "Use not_nil() instead")]
    #[track_caller]
    pub fn check<E: ErrorLike + ?Sized>(&self, err: &E, context: Vec<FieldValue>) -> bool {
        self.not_nil(err, context)
    }
}

fn write_error(e: io::Error) -> LoggerError {
    LoggerError::io_operation("writing log line", "sink rejected the write", e)
}

/// Alert on the first failure and on every 1000th after it
#[inline]
fn should_alert(previous_failures: u64) -> bool {
    previous_failures == 0 || (previous_failures + 1) % 1000 == 0
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.sink.get_mut().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_kvlog::prelude::*;
///
/// let logger = Logger::builder()
///     .sink(MemorySink::new())
///     .level(Level::Debug)
///     .json(true)
///     .file_line(true)
///     .log_format("%s %s: %s")
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.level(), Level::Debug);
/// ```
pub struct LoggerBuilder {
    sink: Option<Sink>,
    options: Options,
    resolver: Option<Arc<dyn CallerResolver>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            sink: None,
            options: Options::default(),
            resolver: None,
        }
    }

    /// Destination of rendered lines; stderr when not set
    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replace every option at once
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.options.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json(mut self, enable: bool) -> Self {
        self.options.enable_json = enable;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_line(mut self, enable: bool) -> Self {
        self.options.enable_file_line = enable;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_id(mut self, enable: bool) -> Self {
        self.options.enable_thread_id = enable;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json_log(mut self, enable: bool) -> Self {
        self.options.json_log = enable;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.options.time_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_format(mut self, template: impl Into<String>) -> Self {
        self.options.log_format = template.into();
        self
    }

    /// Replace how call sites are turned into the `file` field
    #[must_use = "builder methods return a new value"]
    pub fn caller_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let sink = self.sink.unwrap_or_else(|| Box::new(io::stderr()));
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(LocationResolver::new()));
        Logger::from_parts(sink, self.options, resolver)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
