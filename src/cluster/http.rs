//! HTTP utilities for cluster REST API calls

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a response body and strip control characters before logging it
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Extract the `message` field of a Kubernetes `Status` error body, if any
fn status_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// HTTP client wrapper for cluster API calls
#[derive(Clone)]
pub struct ClusterHttpClient {
    client: Client,
    token: Option<String>,
}

impl ClusterHttpClient {
    /// Create a new HTTP client
    pub fn new(token: Option<String>, insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hal/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(insecure)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, token })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return the raw status and body
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = self
            .authorize(request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok((status, body))
    }

    fn check(status: StatusCode, body: &str) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }
        tracing::error!("API error: {} - {}", status, sanitize_for_log(body));
        match status_message(body) {
            Some(message) => Err(anyhow::anyhow!("API request failed: {}: {}", status, message)),
            None => Err(anyhow::anyhow!("API request failed: {}", status)),
        }
    }

    fn parse(body: &str) -> Result<Value> {
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(body).context("Failed to parse response JSON")
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let (status, body) = self.send(self.client.get(url)).await?;
        Self::check(status, &body)?;
        Self::parse(&body)
    }

    /// Make a GET request, mapping 404 to `None`
    pub async fn get_optional(&self, url: &str) -> Result<Option<Value>> {
        tracing::debug!("GET {}", url);

        let (status, body) = self.send(self.client.get(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check(status, &body)?;
        Self::parse(&body).map(Some)
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let (status, response_body) = self.send(self.client.post(url).json(body)).await?;
        Self::check(status, &response_body)?;
        Self::parse(&response_body)
    }

    /// Make a DELETE request, optionally carrying `DeleteOptions`
    pub async fn delete(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        tracing::debug!("DELETE {}", url);

        let mut request = self.client.delete(url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, response_body) = self.send(request).await?;
        Self::check(status, &response_body)?;
        Self::parse(&response_body)
    }
}
