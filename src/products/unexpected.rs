use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq, Hash)]
/// Unexpected transport outcome. Display text is what callers show to the user.
pub enum Unexpected {
    /// Failed to connect to URL (url, details)
    #[error("Failed to connect to URL: {0}. Details: {1}")]
    URLConnectionProblem(String, String),

    /// Request did not complete in time (url, timeout seconds)
    #[error("URL: {0} couldn't be reached in time frame of {1} seconds")]
    HttpConnectionFailed(String, u64),

    /// Name resolution failed (url, details)
    #[error("Couldn't resolve host for URL: {0}. Details: {1}")]
    HostUnresolvable(String, String),

    /// TLS handshake or certificate failure (url, details)
    #[error("TLS failure for URL: {0}. Details: {1}")]
    TLSProblem(String, String),

    /// Curl handle couldn't be configured (url, details)
    #[error("Failed to prepare request for URL: {0}. Details: {1}")]
    HandlerFailed(String, String),

    /// Response code couldn't be read (url, details)
    #[error("URL: {0} returned no readable status. Details: {1}")]
    ResponseUnreadable(String, String),

    /// Check payload couldn't be serialized
    #[error("Failed to serialize check payload! Details: {0}")]
    PayloadProblem(String),

    /// Job identifier is blank
    #[error("Job id is empty")]
    EmptyJobId,
}


#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Invalid CheckRequest input
pub enum RequestError {
    /// Target is empty or blank
    #[error("Target must not be empty")]
    EmptyTarget,

    /// TCP port check without a port
    #[error("Port is required for TCP_PORT checks")]
    MissingPort,

    /// Port outside of 1..=65535
    #[error("Port {0} is out of range 1..65535")]
    PortOutOfRange(i64),

    /// Unknown check type name
    #[error("Unknown check type: \"{0}\"")]
    UnknownCheckType(String),
}


#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Configuration load failure
pub enum ConfigError {
    /// File couldn't be read (path, details)
    #[error("Couldn't read configuration file: {0}. Details: {1}")]
    Unreadable(String, String),

    /// File content isn't valid configuration JSON (path, details)
    #[error("Malformed configuration in file: {0}. Details: {1}")]
    Malformed(String, String),
}
