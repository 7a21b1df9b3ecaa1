//! Core logger types and traits

pub mod caller;
pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod nil;
pub mod options;
pub mod record_builder;
pub mod serializer;
pub mod timestamp;
pub mod value;

pub use caller::{current_thread_id, stack, CallerResolver, LocationResolver};
pub use error::{LoggerError, Result};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, Sink};
pub use metrics::LoggerMetrics;
pub use nil::{is_nil, ErrorLike};
pub use options::Options;
pub use record_builder::{Args, Payload};
pub use serializer::LineFormat;
pub use timestamp::TimestampFormat;
pub use value::{FieldValue, Record};
