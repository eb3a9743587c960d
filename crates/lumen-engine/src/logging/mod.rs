//! Logging utilities.
//!
//! Shader diagnostics, missing-uniform warnings and bootstrap failures all go
//! through the `log` facade; this module only installs the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
