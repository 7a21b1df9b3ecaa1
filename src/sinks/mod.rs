//! Sink implementations
//!
//! Any `std::io::Write + Send` value can serve as a sink. These cover the
//! two common cases besides the standard streams.

pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;
