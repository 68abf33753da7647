//! HTTP transport used by the weather clients.
//!
//! The transport reports failures with an explicit tag: either no structured
//! response exists, or the server answered with an error status and body.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The request never produced a usable response (DNS, connect, timeout, ...)
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("request failed with status {status}")]
    Response { status: u16, data: Value },
}

impl RequestError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Minimal GET capability the weather clients need
pub trait Request {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, RequestError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    client: Client,
}

impl HttpRequest {
    pub fn new(timeout: Duration) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("surfcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RequestError::transport(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Request for HttpRequest {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, RequestError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;

        let status = response.status();
        debug!("Provider answered with status {}", status);

        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| RequestError::transport(e.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;
        let data = serde_json::from_str(&body).unwrap_or(Value::String(body));

        Err(RequestError::Response {
            status: status.as_u16(),
            data,
        })
    }
}

impl<R: Request + ?Sized> Request for &R {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, RequestError> {
        R::get(*self, url, headers).await
    }
}
