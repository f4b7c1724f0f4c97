use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;

use crate::models::{ContactRequest, MessageView, SystemStatus};

/// Why a call to the engine did not produce a usable answer.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("engine unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("engine responded with {0}")]
    Status(StatusCode),

    #[error("engine response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("engine request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Engine down, slow or unhappy. Anything else points at a bug on one side.
    pub fn is_expected(&self) -> bool {
        matches!(self, UpstreamError::Unreachable(_) | UpstreamError::Status(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            UpstreamError::Unreachable(error)
        } else if error.is_decode() {
            UpstreamError::Decode(error)
        } else if let Some(status) = error.status() {
            UpstreamError::Status(status)
        } else {
            UpstreamError::Request(error)
        }
    }
}

/// HTTP client for the engine API. Built once at startup and shared.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
}

impl EngineClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, health_timeout: Duration) -> Self {
        EngineClient {
            http,
            base_url: base_url.into(),
            health_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`, bounded by the health timeout. Only a 200 counts.
    #[instrument(skip(self), fields(engine = %self.base_url))]
    pub async fn health(&self) -> Result<SystemStatus, UpstreamError> {
        let response = self
            .http
            .get(self.url("/health"))
            .timeout(self.health_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status()));
        }

        Ok(response.json::<SystemStatus>().await?)
    }

    /// `POST /contact`. Any non-2xx reply is a failure.
    #[instrument(skip_all, fields(engine = %self.base_url))]
    pub async fn submit_contact(&self, request: &ContactRequest) -> Result<(), UpstreamError> {
        self.http
            .post(self.url("/contact"))
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// `GET /messages`. Only a 200 counts.
    #[instrument(skip(self), fields(engine = %self.base_url))]
    pub async fn messages(&self) -> Result<Vec<MessageView>, UpstreamError> {
        let response = self.http.get(self.url("/messages")).send().await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status()));
        }

        Ok(response.json::<Vec<MessageView>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[tokio::test]
    async fn test_closed_port_is_an_expected_failure() {
        let client = EngineClient::new(
            reqwest::Client::new(),
            closed_port_url(),
            Duration::from_millis(500),
        );

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unreachable(_)), "got {err:?}");
        assert!(err.is_expected());

        let err = client.messages().await.unwrap_err();
        assert!(err.is_expected());
    }

    #[test]
    fn test_status_errors_are_expected() {
        assert!(UpstreamError::Status(StatusCode::INTERNAL_SERVER_ERROR).is_expected());
    }
}
