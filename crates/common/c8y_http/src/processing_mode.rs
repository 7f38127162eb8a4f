use crate::RestError;
use reqwest::header::HeaderName;
use std::fmt;
use std::str::FromStr;

/// `X-Cumulocity-Processing-Mode`
pub const PROCESSING_MODE_HEADER: HeaderName =
    HeaderName::from_static("x-cumulocity-processing-mode");

/// How the platform processes a write request
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProcessingMode {
    /// Stored in the database and forwarded to real-time processing (default)
    Persistent,

    /// Forwarded to real-time processing only, not stored
    Transient,

    /// Stored but not forwarded to real-time processing
    Quiescent,

    /// Forwarded to real-time processing only, without notifying subscribers
    Cep,
}

impl ProcessingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::Persistent => "PERSISTENT",
            ProcessingMode::Transient => "TRANSIENT",
            ProcessingMode::Quiescent => "QUIESCENT",
            ProcessingMode::Cep => "CEP",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingMode {
    type Err = RestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "PERSISTENT" => Ok(ProcessingMode::Persistent),
            "TRANSIENT" => Ok(ProcessingMode::Transient),
            "QUIESCENT" => Ok(ProcessingMode::Quiescent),
            "CEP" => Ok(ProcessingMode::Cep),
            _ => Err(RestError::InvalidProcessingMode(value.to_string())),
        }
    }
}
