use crate::PathError;
use reqwest::Method;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// The error document returned by Cumulocity along with a non-successful status
///
/// ```json
/// {
///     "error": "inventory/Not Found",
///     "message": "Finding device data from database failed : No managedObject for id '12345'!",
///     "info": "https://cumulocity.com/api/core/#error_reporting"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Parse an error body, returning `None` when it is not a Cumulocity error document
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// The broad category of a [RestError]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with an error status or could not be reached
    Http,

    /// The request could not be built or the response could not be decoded
    Local,

    /// The request has been cancelled by the caller
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("{method} {endpoint} failed with status {status}{}", detail(.envelope))]
    Status {
        status: StatusCode,
        method: Method,
        endpoint: String,
        body: String,
        envelope: Option<ErrorEnvelope>,
    },

    #[error("Could not make a successful request to the remote server")]
    Transport(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid URL")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    InvalidPath(#[from] PathError),

    #[error("Failed to serialize the request body")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to decode the response of {endpoint}")]
    Deserialize {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid media type: {0:?}")]
    InvalidMediaType(String),

    #[error("Unknown processing mode: {0:?}")]
    InvalidProcessingMode(String),

    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn detail(envelope: &Option<ErrorEnvelope>) -> String {
    match envelope {
        Some(ErrorEnvelope {
            error,
            message: Some(message),
            ..
        }) => format!(": {error}: {message}"),
        Some(ErrorEnvelope { error, .. }) => format!(": {error}"),
        None => String::new(),
    }
}

impl RestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestError::Status { .. } | RestError::Transport(_) => ErrorKind::Http,
            RestError::Cancelled => ErrorKind::Cancelled,
            _ => ErrorKind::Local,
        }
    }

    /// The HTTP status returned by the server, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RestError::Status { status, .. } => Some(*status),
            RestError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// The error document returned by the server, if any
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            RestError::Status { envelope, .. } => envelope.as_ref(),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RestError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn status_error_displays_server_message() {
        let body = r#"{"error":"inventory/Not Found","message":"No managedObject for id '12345'!","info":"https://cumulocity.com/api/core/#error_reporting"}"#;
        let error = RestError::Status {
            status: StatusCode::NOT_FOUND,
            method: Method::GET,
            endpoint: "/inventory/managedObjects/12345".into(),
            body: body.into(),
            envelope: ErrorEnvelope::parse(body),
        };

        assert_eq!(
            error.to_string(),
            "GET /inventory/managedObjects/12345 failed with status 404 Not Found: inventory/Not Found: No managedObject for id '12345'!"
        );
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(error.kind(), ErrorKind::Http);
    }

    #[test]
    fn status_error_without_envelope_keeps_raw_body() {
        let error = RestError::Status {
            status: StatusCode::BAD_GATEWAY,
            method: Method::POST,
            endpoint: "/event/events".into(),
            body: "<html>Bad Gateway</html>".into(),
            envelope: ErrorEnvelope::parse("<html>Bad Gateway</html>"),
        };

        assert_eq!(
            error.to_string(),
            "POST /event/events failed with status 502 Bad Gateway"
        );
        assert!(error.envelope().is_none());
    }

    #[test_case(RestError::Cancelled, ErrorKind::Cancelled)]
    #[test_case(RestError::InvalidMediaType("json".into()), ErrorKind::Local)]
    #[test_case(RestError::InvalidPath(PathError::EmptyParameter { template: "/event/events/{id}".into(), position: 0 }), ErrorKind::Local)]
    fn errors_are_categorized(error: RestError, kind: ErrorKind) {
        assert_eq!(error.kind(), kind);
    }
}
