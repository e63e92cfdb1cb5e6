mod log_sink;

pub use log_sink::LogEntry;
pub use log_sink::LogLevel;
pub use log_sink::LogSink;
pub use log_sink::MemoryLogSink;
pub use log_sink::MAX_LOG_ENTRIES;
