//! Integration tests for the key/value logger
//!
//! These tests verify:
//! - Level filtering across all eight severities
//! - Argument normalization in plain and JSON modes
//! - Error classification through `not_nil`
//! - Caller and thread injection
//! - File output and configuration loading

use chrono::{TimeZone, Utc};
use rust_kvlog::prelude::*;
use rust_kvlog::{CallerResolver, LocationResolver};
use std::collections::HashMap;
use std::fs;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn json_logger(sink: &MemorySink) -> Logger {
    Logger::builder()
        .sink(sink.clone())
        .json(true)
        .level(Level::Debug)
        .build()
        .expect("Failed to build logger")
}

fn log_at(logger: &Logger, level: Level, args: Vec<FieldValue>) {
    match level {
        Level::Emergency => logger.emerg(args),
        Level::Alert => logger.alert(args),
        Level::Critical => logger.crit(args),
        Level::Error => logger.err(args),
        Level::Warning => logger.warning(args),
        Level::Notice => logger.notice(args),
        Level::Informational => logger.info(args),
        Level::Debug => logger.debug(args),
    }
}

#[test]
fn test_threshold_matrix() {
    for threshold in Level::ALL {
        for level in Level::ALL {
            let sink = MemorySink::new();
            let logger = Logger::new(sink.clone());
            logger.set_level(threshold);

            log_at(&logger, level, kv!["x"]);

            assert_eq!(
                !sink.is_empty(),
                level <= threshold,
                "level {} with threshold {}",
                level,
                threshold
            );
        }
    }
}

#[test]
fn test_output_line_shape() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone());
    let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    logger
        .output(time, Level::Notice, "hello\n")
        .expect("Failed to write line");
    logger
        .output(time, Level::Debug, "no newline")
        .expect("Failed to write line");

    assert_eq!(
        sink.contents(),
        "[2024-01-02T03:04:05.000Z] NOTICE hello\n[2024-01-02T03:04:05.000Z] DEBUG no newline\n"
    );
}

#[test]
fn test_only_one_trailing_newline_is_trimmed() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone());

    logger.info("two\n\n");
    assert!(sink.contents().ends_with("INFO two\n\n"));
}

#[test]
fn test_plain_text_debug_line() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone());
    logger.set_level(Level::Debug);

    logger.debug("xxx\n");

    let contents = sink.contents();
    assert!(contents.starts_with('['));
    assert!(contents.ends_with("DEBUG xxx\n"));
}

#[test]
fn test_key_value_record() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    logger.info(kv!["key", "val"]);
    assert!(sink.contents().ends_with("INFO {\"key\":\"val\"}\n"));
}

#[test]
fn test_positional_fallback() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    logger.info(kv![1, "vidar", "age"]);
    logger.info(kv![1, "vidar", "age", 18]);

    let lines = sink.lines();
    assert!(lines[0].ends_with(r#"{"message1":1,"message2":"vidar","message3":"age"}"#));
    assert!(lines[1]
        .ends_with(r#"{"message1":1,"message2":"vidar","message3":"age","message4":18}"#));
}

#[test]
fn test_map_passthrough() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    let mut fields = HashMap::new();
    fields.insert("msg".to_string(), 1);
    logger.info(kv![fields]);

    assert!(sink.contents().ends_with("INFO {\"msg\":1}\n"));
}

#[test]
fn test_empty_call_logs_null_message() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    logger.notice(kv![]);
    assert!(sink.contents().ends_with("NOTICE {\"message\":null}\n"));
}

#[test]
fn test_error_values_are_flattened() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    let io = std::io::Error::other("disk full");
    logger.err(kv!["error", FieldValue::error(&io), "path", "/tmp"]);

    assert!(sink
        .contents()
        .ends_with("ERR {\"error\":\"disk full\",\"path\":\"/tmp\"}\n"));
}

#[test]
fn test_nan_does_not_panic() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    logger.warning(kv!["ratio", f64::NAN]);

    let line = sink.lines().pop().expect("Expected one line");
    let json = line.split_once("WARNING ").expect("Missing level").1;
    let parsed: serde_json::Value = serde_json::from_str(json).expect("Fallback is valid JSON");
    assert!(parsed["json-marshal-error"].is_string());
    assert_eq!(logger.metrics().marshal_failures(), 1);
}

#[test]
fn test_not_nil() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    let typed_null: Option<Box<dyn std::error::Error + Send + Sync>> = None;
    assert!(!logger.not_nil(&Some(typed_null), kv![]));
    assert!(!logger.not_nil(&FieldValue::Null, kv![]));
    assert!(sink.is_empty());

    let failed: std::result::Result<(), std::io::Error> =
        Err(std::io::Error::other("invalid args"));
    assert!(logger.not_nil(&failed, kv!["Userid", "123456"]));
    assert!(sink
        .contents()
        .ends_with("ERR {\"Userid\":\"123456\",\"error\":\"invalid args\"}\n"));
}

#[test]
#[allow(deprecated)]
fn test_check_alias() {
    let sink = MemorySink::new();
    let logger = json_logger(&sink);

    assert!(logger.check(&std::io::Error::other("boom"), kv!["odd"]));
    assert!(sink
        .contents()
        .ends_with("{\"message1\":\"error\",\"message2\":\"boom\",\"message3\":\"odd\"}\n"));
}

#[test]
fn test_file_line_points_at_call_site() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .json(true)
        .file_line(true)
        .build()
        .expect("Failed to build logger");

    let expected = format!("{}:{}", file!(), line!() + 1);
    rust_kvlog::info!(logger, "k", "v");
    let also = format!("{}:{}", file!(), line!() + 1);
    assert!(logger.not_nil("boom", kv![]));

    let lines = sink.lines();
    assert!(lines[0].contains(&format!("\"file\":\"{}\"", expected)), "{}", lines[0]);
    assert!(lines[1].contains(&format!("\"file\":\"{}\"", also)), "{}", lines[1]);
}

#[test]
fn test_disabled_levels_skip_resolution() {
    struct Counting(AtomicUsize);

    impl CallerResolver for Counting {
        fn resolve(&self, location: &Location<'_>) -> String {
            self.0.fetch_add(1, Ordering::SeqCst);
            LocationResolver::new().resolve(location)
        }
    }

    let resolver = Arc::new(Counting(AtomicUsize::new(0)));
    let logger = Logger::builder()
        .sink(MemorySink::new())
        .json(true)
        .file_line(true)
        .caller_resolver(resolver.clone())
        .level(Level::Emergency)
        .build()
        .expect("Failed to build logger");

    for level in &Level::ALL[1..] {
        log_at(&logger, *level, kv!["k", "v"]);
        logger.log_fmt(*level, format_args!("{}", 1));
    }
    assert!(logger.not_nil("boom", kv![]));
    assert_eq!(resolver.0.load(Ordering::SeqCst), 0);
}

#[test]
fn test_json_log_lines_parse() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .json_log(true)
        .thread_id(true)
        .time_format(TimestampFormat::Rfc3339)
        .build()
        .expect("Failed to build logger");

    logger.info(kv!["a", "1"]);
    logger.infof(format_args!("started in {}ms", 12));

    for line in sink.lines() {
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("Line is JSON");
        assert_eq!(parsed["level"], "INFO");
        assert!(parsed["timestamp"].is_string());
        assert!(parsed["thread_id"].as_u64().unwrap() > 0);
    }
    assert!(sink.lines()[1].contains("\"message\":\"started in 12ms\""));
}

#[test]
fn test_custom_formats() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .time_format(TimestampFormat::custom("%Y"))
        .log_format("%s %s: %s")
        .build()
        .expect("Failed to build logger");

    logger.warningf(format_args!("{}%", 90));

    let year = Utc::now().format("%Y").to_string();
    assert_eq!(sink.contents(), format!("{} WARNING: 90%\n", year));
}

#[test]
fn test_invalid_log_format() {
    let result = Logger::builder()
        .sink(MemorySink::new())
        .log_format("%s %s %s %s")
        .build();
    assert!(matches!(
        result,
        Err(LoggerError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_options_from_json() {
    let options = Options::from_json_str(
        r#"{"enable_json": true, "level": "Warning", "log_format": "%s|%s|%s"}"#,
    )
    .expect("Failed to parse options");

    let sink = MemorySink::new();
    let logger = Logger::with_options(sink.clone(), options).expect("Failed to build logger");

    logger.info(kv!["hidden", true]);
    logger.warning(kv!["shown", true]);

    assert_eq!(logger.level(), Level::Warning);
    assert_eq!(sink.lines().len(), 1);
    assert!(sink.contents().ends_with("|WARNING|{\"shown\":true}\n"));
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    {
        let sink = FileSink::open(&log_file).expect("Failed to open sink");
        let logger = Logger::builder()
            .sink(sink)
            .json(true)
            .build()
            .expect("Failed to build logger");

        logger.info(kv!["request", 1]);
        logger.err(kv!["request", 2]);
        logger.flush().expect("Failed to flush");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("INFO {\"request\":1}"));
    assert!(lines[1].ends_with("ERR {\"request\":2}"));
}

#[test]
fn test_metrics_track_calls() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone());

    logger.info("a");
    logger.debug("b");
    logger.debug("c");

    // Disabled calls leave every counter alone
    let metrics = logger.metrics();
    assert_eq!(metrics.lines_written(), 1);
    assert_eq!(metrics.write_failures(), 0);
    assert_eq!(metrics.marshal_failures(), 0);
}
