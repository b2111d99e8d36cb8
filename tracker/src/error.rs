use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that end a tracker run
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The replay file could not be opened
    #[error("failed to open replay file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The serial port could not be opened or configured
    #[error("failed to open serial port {port} at {baud_rate} baud: {source}")]
    PortOpen {
        port: String,
        baud_rate: u32,
        #[source]
        source: serialport::Error,
    },

    /// Reading from an open source failed
    #[error("failed to read from {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Configuration rejected before a run could start
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        /// Configuration parameter that caused the error
        parameter: Option<&'static str>,
    },

    /// The configuration file could not be read or parsed
    #[error("failed to load config {}: {message}", .path.display())]
    ConfigFile { path: PathBuf, message: String },
}

/// A line that does not hold exactly three finite numbers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedSample {
    #[error("expected 3 comma separated values, found {found} in {line:?}")]
    FieldCount { line: String, found: usize },

    #[error("line of {length} bytes exceeds the {max} byte limit")]
    TooLong { line: String, length: usize, max: usize },

    #[error("{token:?} is not a number in {line:?}")]
    InvalidNumber { line: String, token: String },

    #[error("{source} in {line:?}")]
    NonFinite {
        line: String,
        #[source]
        source: attitude::AttitudeError,
    },
}

impl MalformedSample {
    /// The raw line that was rejected
    pub fn line(&self) -> &str {
        match self {
            MalformedSample::FieldCount { line, .. }
            | MalformedSample::TooLong { line, .. }
            | MalformedSample::InvalidNumber { line, .. }
            | MalformedSample::NonFinite { line, .. } => line,
        }
    }
}

pub(crate) fn config_error(message: impl Into<String>, parameter: Option<&'static str>) -> TrackerError {
    TrackerError::Config {
        message: message.into(),
        parameter,
    }
}

/// Type alias for Result with TrackerError
pub type TrackerResult<T> = Result<T, TrackerError>;
