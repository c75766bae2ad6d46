//! Structured logging for the EduCheck backend.
//!
//! Wraps `tracing` to provide console output, an optional rolling NDJSON
//! file, environment-based level control, and token redaction.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
