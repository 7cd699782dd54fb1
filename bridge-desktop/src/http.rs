//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse},
};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default deadline applied when a request carries none of its own
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - Exactly one attempt per request; timeouts surface as [`BridgeError::Timeout`]
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| {
                BridgeError::OperationFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    fn convert_error(&self, error: reqwest::Error, deadline: Duration) -> BridgeError {
        if error.is_timeout() {
            BridgeError::Timeout(deadline)
        } else if error.is_connect() {
            BridgeError::OperationFailed(format!("Connection failed: {}", error))
        } else {
            BridgeError::OperationFailed(error.to_string())
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let deadline = request.timeout.unwrap_or(self.timeout);
        debug!(url = %request.url, timeout_ms = deadline.as_millis() as u64, "Executing HTTP request");

        let response = match self.build_request(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "HTTP request failed");
                return Err(self.convert_error(e, deadline));
            }
        };

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.convert_error(e, deadline))?;

        Ok(HttpResponse { status, body })
    }
}
