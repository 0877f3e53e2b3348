//! Authenticated HTTP transport for the Notifica API.
//!
//! `Transport` is the raw exchange seam (reqwest in production, a scripted
//! fake in tests). `ApiClient` layers the credential headers, URL building,
//! and response classification on top of it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, ORIGIN};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ResolvedConfig;
use crate::{Error, Result};

pub const PUBLISHABLE_KEY_HEADER: &str = "x-notifica-publishable-key";
pub const SUBSCRIBER_ID_HEADER: &str = "x-notifica-subscriber-id";

const UNKNOWN_ORIGIN: &str = "unknown";

/// A fully built outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// Status and body text of a completed exchange, before classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One raw HTTP exchange.
///
/// Implementations report connection-level failures as `Error::Network` and
/// hand every received status back unclassified.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build().map_err(Error::network)?;
        Ok(Self { client })
    }

    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(Error::network)?;
        let status = response.status();
        let body = if status.is_success() {
            response.text().await.map_err(Error::network)?
        } else {
            response.text().await.unwrap_or_default()
        };
        Ok(HttpResponse { status, body })
    }
}

/// Per-call request options; path-relative, headers are merged.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated client bound to one resolved configuration.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ResolvedConfig>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client using the reqwest transport.
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(config: ResolvedConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Issue a request and return the raw success body.
    ///
    /// `path` is appended to the configured API URL and must start with `/`.
    pub async fn send(&self, path: &str, options: RequestOptions) -> Result<String> {
        if !path.starts_with('/') {
            return Err(Error::InvalidRequest(format!(
                "path must start with '/': {path}"
            )));
        }

        let url = format!("{}{}", self.config.api_url, path);
        let headers = self.authenticated_headers(options.headers)?;
        let method = options.method;

        tracing::debug!(%method, path, "Sending Notifica API request");
        let response = self
            .transport
            .send(HttpRequest {
                method: method.clone(),
                url,
                headers,
                body: options.body,
            })
            .await
            .inspect_err(|error| {
                tracing::debug!(%method, path, %error, "Notifica API request failed");
            })?;
        tracing::debug!(
            %method,
            path,
            status = response.status.as_u16(),
            "Notifica API responded"
        );

        classify_response(response, self.config.origin.as_deref())
    }

    /// Issue a request and decode the JSON success body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let body = self.send(path, options).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn authenticated_headers(&self, mut headers: HeaderMap) -> Result<HeaderMap> {
        headers.insert(
            HeaderName::from_static(PUBLISHABLE_KEY_HEADER),
            header_value(&self.config.publishable_key, "publishable key")?,
        );
        headers.insert(
            HeaderName::from_static(SUBSCRIBER_ID_HEADER),
            header_value(&self.config.subscriber_id, "subscriber id")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(origin) = &self.config.origin {
            headers.insert(ORIGIN, header_value(origin, "origin")?);
        }
        Ok(headers)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Map a raw response onto the success/typed-error/generic-error split.
pub fn classify_response(response: HttpResponse, origin: Option<&str>) -> Result<String> {
    let status = response.status;
    if status.is_success() {
        return Ok(response.body);
    }

    if status == StatusCode::FORBIDDEN {
        return Err(Error::OriginNotAllowed {
            origin: origin.unwrap_or(UNKNOWN_ORIGIN).to_string(),
        });
    }

    Err(Error::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body: response.body,
    })
}

fn header_value(value: &str, field: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidRequest(format!("{field} is not a valid header value")))
}
