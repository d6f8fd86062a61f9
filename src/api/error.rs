//! Classification of transport and HTTP failures
//!
//! Failures never escape the request layer; they are classified here so the
//! log line says what went wrong and so a 401 can be told apart when the
//! renew-on-unauthorized hardening is switched on.

use std::fmt;

/// What kind of failure an outbound call ran into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// No usable token could be obtained before the call
    MissingToken,
    /// Connection, DNS or request construction errors
    Network,
    /// The request or connection timed out
    Timeout,
    /// HTTP 401
    Unauthorized,
    /// Other 4xx responses
    ClientError(u16),
    /// 5xx responses
    ServerError(u16),
    /// The response body was not the JSON/XML we expected
    Decode,
    Unknown,
}

impl RequestFailure {
    pub fn from_status_code(status: u16) -> Self {
        match status {
            401 => RequestFailure::Unauthorized,
            400..=499 => RequestFailure::ClientError(status),
            500..=599 => RequestFailure::ServerError(status),
            _ => RequestFailure::Unknown,
        }
    }

    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            RequestFailure::Timeout
        } else if let Some(status) = error.status() {
            Self::from_status_code(status.as_u16())
        } else if error.is_decode() || error.is_body() {
            RequestFailure::Decode
        } else if error.is_connect() || error.is_request() || error.is_builder() {
            RequestFailure::Network
        } else {
            RequestFailure::Unknown
        }
    }

    /// Wrap this classification and a detail message into an `anyhow::Error`
    pub fn into_error(self, detail: impl fmt::Display) -> anyhow::Error {
        anyhow::Error::new(RequestError {
            failure: self,
            detail: detail.to_string(),
        })
    }

    /// Recover the classification from an error built with [`RequestFailure::into_error`]
    pub fn of(error: &anyhow::Error) -> Option<&RequestFailure> {
        error.downcast_ref::<RequestError>().map(|e| &e.failure)
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::MissingToken => write!(f, "no token found"),
            RequestFailure::Network => write!(f, "network error"),
            RequestFailure::Timeout => write!(f, "request timed out"),
            RequestFailure::Unauthorized => write!(f, "HTTP 401 unauthorized"),
            RequestFailure::ClientError(status) => write!(f, "HTTP {} client error", status),
            RequestFailure::ServerError(status) => write!(f, "HTTP {} server error", status),
            RequestFailure::Decode => write!(f, "malformed response body"),
            RequestFailure::Unknown => write!(f, "unknown error"),
        }
    }
}

#[derive(Debug)]
struct RequestError {
    failure: RequestFailure,
    detail: String,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.failure)
        } else {
            write!(f, "{}: {}", self.failure, self.detail)
        }
    }
}

impl std::error::Error for RequestError {}
