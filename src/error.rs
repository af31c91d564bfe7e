//! Unified error types for the coordinator.
//!
//! Request handling never fails: bad input is defaulted or clamped.  What
//! remains are startup failures (configuration, socket binding) and the
//! server loop itself, which funnel into [`Error`].

use core::fmt;

use crate::app::ports::ConfigError;

/// Every fatal coordinator failure funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// The listener could not be bound.
    Bind {
        addr: String,
        source: std::io::Error,
    },
    /// The HTTP server loop terminated with an I/O error.
    Serve(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Bind { addr, source } => write!(f, "bind {addr}: {source}"),
            Self::Serve(e) => write!(f, "serve: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Bind { source, .. } => Some(source),
            Self::Serve(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Coordinator-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
