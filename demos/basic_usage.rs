//! Basic logger usage example
//!
//! Demonstrates plain and JSON output, level filtering, error helpers and
//! the process-wide default logger.
//!
//! Run with: cargo run --example basic_usage

use rust_kvlog::prelude::*;
use rust_kvlog::{global, infof, warning};
use std::io;

fn main() -> Result<()> {
    println!("=== rust_kvlog - Basic Usage Example ===\n");

    // Plain-text logger on stdout
    let logger = Logger::builder().sink(io::stdout()).level(Level::Debug).build()?;

    println!("1. Logging at every level:");
    logger.emerg("This is an emergency message");
    logger.alert("This is an alert message");
    logger.crit("This is a critical message");
    logger.err("This is an error message");
    logger.warning("This is a warning message");
    logger.notice("This is a notice message");
    logger.info("This is an info message");
    logger.debug("This is a debug message");

    println!("\n2. Raising the threshold to WARNING - notice, info and debug won't show:");
    logger.set_level(Level::Warning);
    logger.info("Info message (hidden)");
    logger.warning("Warning message (visible)");

    println!("\n3. JSON records with caller information:");
    let json = Logger::builder()
        .sink(io::stdout())
        .json(true)
        .file_line(true)
        .build()?;
    json.info(kv!["name", "vidar", "age", 18]);
    json.info(kv![1, "vidar", "age"]);
    infof!(json, "listening on port {}", 8080);
    warning!(json, "disk", "/dev/sda1", "used_pct", 91.5);

    println!("\n4. Error helpers:");
    let parsed: std::result::Result<u16, _> = "80a".parse::<u16>();
    if json.not_nil(&parsed, kv!["input", "80a"]) {
        println!("   parse failure was logged");
    }
    let fine: std::result::Result<u16, io::Error> = Ok(80);
    assert!(json.is_nil_or_log(&fine, kv![]));

    println!("\n5. One JSON object per line:");
    let json_log = Logger::builder()
        .sink(io::stdout())
        .json_log(true)
        .thread_id(true)
        .build()?;
    json_log.notice(kv!["event", "startup"]);

    println!("\n6. The default logger writes JSON to stderr:");
    global::logger().info(kv!["from", "global"]);

    println!(
        "\nLines written by the JSON logger: {}",
        json.metrics().lines_written()
    );
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
