//! Error types for the surf forecast pipeline

use serde_json::Value;
use thiserror::Error;

/// Failure of a weather provider client.
///
/// The two kinds are disjoint: either the request never produced a structured
/// response, or the provider answered with an error status and body.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure, no structured provider response
    #[error("Unexpected error when trying to communicate to {service}: {}", json_message(.message))]
    Communication { service: String, message: String },

    /// The provider answered with a non-success status
    #[error("Unexpected error returned by the {service} service: Error: {data} Code: {status}")]
    ServiceResponse {
        service: String,
        status: u16,
        data: Value,
    },
}

impl ClientError {
    pub fn communication<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Communication {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn service_response<S: Into<String>>(service: S, status: u16, data: Value) -> Self {
        Self::ServiceResponse {
            service: service.into(),
            status,
            data,
        }
    }
}

fn json_message(message: &str) -> String {
    Value::String(message.to_string()).to_string()
}

/// Aggregation failed while fetching or rating a beach's forecast
#[derive(Error, Debug)]
#[error("Unexpected error during the forecast processing: {message}")]
pub struct ForecastProcessingInternalError {
    pub message: String,
}

impl ForecastProcessingInternalError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Crate-level error for configuration and storage concerns
#[derive(Error, Debug)]
pub enum SurfcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl SurfcastError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_communication_message_quotes_original() {
        let err = ClientError::communication("StormGlass", "Network Error");
        assert_eq!(
            err.to_string(),
            r#"Unexpected error when trying to communicate to StormGlass: "Network Error""#
        );
    }

    #[test]
    fn test_service_response_message() {
        let err = ClientError::service_response(
            "StormGlass",
            429,
            json!({ "errors": ["Rate Limit reached"] }),
        );
        assert_eq!(
            err.to_string(),
            r#"Unexpected error returned by the StormGlass service: Error: {"errors":["Rate Limit reached"]} Code: 429"#
        );
    }

    #[test]
    fn test_processing_error_wraps_message() {
        let err = ForecastProcessingInternalError::new("boom");
        assert_eq!(
            err.to_string(),
            "Unexpected error during the forecast processing: boom"
        );
    }

    #[test]
    fn test_crate_error_messages() {
        let config_err = SurfcastError::config("Cache TTL cannot exceed 1 week");
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Cache TTL cannot exceed 1 week"
        );

        let cache_err = SurfcastError::cache("keyspace is locked");
        assert!(matches!(cache_err, SurfcastError::Cache { .. }));
        assert_eq!(cache_err.to_string(), "Cache error: keyspace is locked");
    }
}
