//! "Echo my IP" HTTP client.

use dsmesh_core::{FallbackCause, MeshError, Result};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ResolverConfig, DEFAULT_TIMEOUT};

/// Client for plain-text endpoints that answer with the caller's address
#[derive(Debug, Clone)]
pub struct EchoClient {
    http: HttpClient,
    timeout: Duration,
}

impl EchoClient {
    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> EchoClientBuilder {
        EchoClientBuilder::new()
    }

    /// Create a client using the timeout and User-Agent from `config`
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .system_proxy(config.system_proxy)
            .build()
    }

    /// GET `url` and return the body, trimmed.
    ///
    /// Anything other than a 200 is a failure; the body is not inspected.
    pub async fn fetch(&self, url: &Url) -> std::result::Result<String, FallbackCause> {
        debug!(url = %url, "GET echo endpoint");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FallbackCause::Transport(format!(
                    "request timed out after {} seconds",
                    self.timeout.as_secs_f32()
                ))
            } else {
                FallbackCause::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "echo endpoint refused");
            return Err(FallbackCause::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FallbackCause::Transport(e.to_string()))?;

        Ok(body.trim().to_string())
    }
}

/// Builder for configuring an [`EchoClient`]
pub struct EchoClientBuilder {
    timeout: Duration,
    user_agent: String,
    system_proxy: bool,
}

impl Default for EchoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoClientBuilder {
    /// Create a builder with the default timeout and User-Agent
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dsmesh/{}", env!("CARGO_PKG_VERSION")),
            system_proxy: true,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Enable or disable proxies taken from the environment
    #[must_use]
    pub const fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<EchoClient> {
        let mut builder = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true);
        if !self.system_proxy {
            builder = builder.no_proxy();
        }

        let http = builder
            .build()
            .map_err(|e| MeshError::Http(e.to_string()))?;

        Ok(EchoClient {
            http,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn url(server: &MockServer) -> Url {
        Url::parse(&format!("{}/ip", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn trims_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ip"))
            .and(header("user-agent", "dsmesh-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  203.0.113.7\n"))
            .expect(1)
            .mount(&server)
            .await;

        let client = EchoClient::builder()
            .user_agent("dsmesh-test")
            .system_proxy(false)
            .build()
            .unwrap();
        let body = client.fetch(&url(&server)).await.unwrap();
        assert_eq!(body, "203.0.113.7");
    }

    #[tokio::test]
    async fn non_200_is_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = EchoClient::builder().system_proxy(false).build().unwrap();
        let err = client.fetch(&url(&server)).await.unwrap_err();
        assert_eq!(err, FallbackCause::Status(204));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("203.0.113.7")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = EchoClient::builder()
            .timeout(Duration::from_millis(100))
            .system_proxy(false)
            .build()
            .unwrap();
        let err = client.fetch(&url(&server)).await.unwrap_err();
        assert!(matches!(err, FallbackCause::Transport(_)));
    }
}
