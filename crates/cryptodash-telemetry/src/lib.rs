//! Structured logging for the cryptodash binary.

mod logging;

pub use logging::{setup_logging, LogFormat, LoggingError};
