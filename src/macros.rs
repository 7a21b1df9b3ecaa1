//! Logging macros
//!
//! The severity macros take a logger and an argument list, which is
//! normalized the same way as a `Vec<FieldValue>` handed to the logger
//! methods. The `f`-suffixed macros take a format string, similar to
//! `println!`, and are only formatted when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_kvlog::prelude::*;
//! use rust_kvlog::{info, infof};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::with_options(sink.clone(), Options::new().with_json(true)).unwrap();
//!
//! // Key/value pairs
//! info!(logger, "user", "alice", "attempts", 3);
//!
//! // Formatted message, logged under "message"
//! let port = 8080;
//! infof!(logger, "listening on port {}", port);
//!
//! let lines = sink.lines();
//! assert!(lines[0].ends_with(r#"INFO {"attempts":3,"user":"alice"}"#));
//! assert!(lines[1].ends_with(r#"INFO {"message":"listening on port 8080"}"#));
//! ```

/// Build an argument list of [`FieldValue`](crate::FieldValue)s
///
/// ```
/// use rust_kvlog::{kv, FieldValue};
///
/// let args = kv!["name", "vidar", "age", 18];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[3], FieldValue::from(18));
/// assert!(kv![].is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<$crate::FieldValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::FieldValue::from($value)),+]
    };
}

/// Log an argument list at the given level
///
/// ```
/// # use rust_kvlog::prelude::*;
/// # let sink = MemorySink::new();
/// # let logger = Logger::new(sink.clone());
/// use rust_kvlog::log;
/// log!(logger, Level::Error, "code", 500);
/// log!(logger, Level::Debug, "dropped");
/// assert_eq!(sink.lines().len(), 1);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $value:expr)* $(,)?) => {
        $logger.log($level, $crate::kv![$($value),*])
    };
}

/// Log a formatted message at the given level
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, ::std::format_args!($($arg)+))
    };
}

/// Log at `EMERG` level
#[macro_export]
macro_rules! emerg {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.emerg($crate::kv![$($value),*])
    };
}

/// Log at `ALERT` level
#[macro_export]
macro_rules! alert {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.alert($crate::kv![$($value),*])
    };
}

/// Log at `CRIT` level
#[macro_export]
macro_rules! crit {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.crit($crate::kv![$($value),*])
    };
}

/// Log at `ERR` level
///
/// ```
/// # use rust_kvlog::prelude::*;
/// # let sink = MemorySink::new();
/// # let logger = Logger::new(sink.clone());
/// use rust_kvlog::err;
/// err!(logger, "connection refused", 111);
/// assert!(sink.contents().ends_with("ERR connection refused111\n"));
/// ```
#[macro_export]
macro_rules! err {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.err($crate::kv![$($value),*])
    };
}

/// Log at `WARNING` level
#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.warning($crate::kv![$($value),*])
    };
}

/// Log at `NOTICE` level
#[macro_export]
macro_rules! notice {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.notice($crate::kv![$($value),*])
    };
}

/// Log at `INFO` level
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.info($crate::kv![$($value),*])
    };
}

/// Log at `DEBUG` level
///
/// ```
/// # use rust_kvlog::prelude::*;
/// # let sink = MemorySink::new();
/// # let logger = Logger::new(sink.clone());
/// use rust_kvlog::debug;
/// debug!(logger, "cache", "miss");
/// assert!(sink.is_empty());
///
/// logger.set_level(Level::Debug);
/// debug!(logger, "cache", "miss");
/// assert!(sink.contents().ends_with("DEBUG cachemiss\n"));
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.debug($crate::kv![$($value),*])
    };
}

#[macro_export]
macro_rules! emergf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emergf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! alertf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.alertf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! critf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.critf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warningf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! noticef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.noticef(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn json_logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .json(true)
            .level(Level::Debug)
            .build()
            .unwrap();
        (logger, sink)
    }

    #[test]
    fn test_kv_macro() {
        let args = kv!["a", 1, true, (), 2.5];
        assert_eq!(
            args,
            vec![
                FieldValue::from("a"),
                FieldValue::Int(1),
                FieldValue::Bool(true),
                FieldValue::Null,
                FieldValue::Float(2.5),
            ]
        );
        assert_eq!(kv!["trailing",], vec![FieldValue::from("trailing")]);
    }

    #[test]
    fn test_severity_macros() {
        let (logger, sink) = json_logger();

        crate::emerg!(logger, "k", "v");
        crate::alert!(logger, "k", "v");
        crate::crit!(logger, "k", "v");
        crate::err!(logger, "k", "v");
        crate::warning!(logger, "k", "v");
        crate::notice!(logger, "k", "v");
        crate::info!(logger, "k", "v");
        crate::debug!(logger, "k", "v");

        let lines = sink.lines();
        let names: Vec<&str> = Level::ALL.iter().map(Level::name).collect();
        assert_eq!(lines.len(), names.len());
        for (line, name) in lines.iter().zip(names) {
            assert!(line.ends_with(&format!("{} {{\"k\":\"v\"}}", name)), "{}", line);
        }
    }

    #[test]
    fn test_empty_argument_list() {
        let (logger, sink) = json_logger();
        crate::info!(logger);
        assert!(sink.contents().ends_with("INFO {\"message\":null}\n"));
    }

    #[test]
    fn test_formatted_macros() {
        let (logger, sink) = json_logger();

        crate::emergf!(logger, "{}", 0);
        crate::alertf!(logger, "{}", 1);
        crate::critf!(logger, "{}", 2);
        crate::errf!(logger, "{}", 3);
        crate::warningf!(logger, "{}", 4);
        crate::noticef!(logger, "{}", 5);
        crate::infof!(logger, "{}", 6);
        crate::debugf!(logger, "{} {}", "hello world", 7);

        let lines = sink.lines();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].ends_with("EMERG {\"message\":\"0\"}"));
        assert!(lines[7].ends_with("DEBUG {\"message\":\"hello world 7\"}"));
    }

    #[test]
    fn test_log_macros() {
        let (logger, sink) = json_logger();
        crate::log!(logger, Level::Notice, "n", 1);
        crate::logf!(logger, Level::Warning, "{}-{}", "a", "b");

        let lines = sink.lines();
        assert!(lines[0].ends_with("NOTICE {\"n\":1}"));
        assert!(lines[1].ends_with("WARNING {\"message\":\"a-b\"}"));
    }
}
