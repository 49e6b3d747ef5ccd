//! Error types for the DataStage client.
//!
//! # Design
//! `MissingRequiredParameters` is raised locally, before any request leaves
//! the process, and is the only variant that does not originate in the
//! transport or in decoding a response. Callers that need to tell the two
//! apart use `is_missing_parameters()`. Non-2xx responses land in `Http` with
//! the raw status and body; the client does not retry or reclassify them.

use thiserror::Error;

/// Errors returned by the service facades.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more required parameters were absent. Lists every missing name.
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingRequiredParameters(Vec<String>),

    /// The operation is not part of the service surface it was invoked on.
    #[error("operation {operation} is not available on service {service}")]
    UnsupportedOperation {
        operation: &'static str,
        service: &'static str,
    },

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request could not be delivered.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Request parameters could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// External configuration was incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn is_missing_parameters(&self) -> bool {
        matches!(self, Error::MissingRequiredParameters(_))
    }

    /// Returns the HTTP status code if the server answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Transport(TransportError::Request(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failures inside the transport before a response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("request body could not be encoded: {0}")]
    Body(#[source] serde_json::Error),
}

/// Problems resolving service configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no authentication type configured for service {service}")]
    MissingAuthType { service: String },

    #[error("unsupported authentication type {auth_type:?} for service {service}")]
    UnsupportedAuthType { service: String, auth_type: String },

    #[error("property {property} is required for {auth_type} authentication of service {service}")]
    MissingProperty {
        service: String,
        auth_type: &'static str,
        property: &'static str,
    },

    #[error("failed to read credentials file {path}: {source}")]
    CredentialsFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_message_lists_all_names() {
        let err = Error::MissingRequiredParameters(vec![
            "dataIntgFlowId".to_string(),
            "dataIntgFlowName".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required parameters: dataIntgFlowId, dataIntgFlowName"
        );
        assert!(err.is_missing_parameters());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn http_error_reports_status() {
        let err = Error::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_missing_parameters());
        assert_eq!(err.to_string(), "HTTP 404: not found");
    }

    #[test]
    fn config_error_converts() {
        let err: Error = ConfigError::MissingAuthType {
            service: "datastage".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Config(ConfigError::MissingAuthType { .. })));
    }
}
