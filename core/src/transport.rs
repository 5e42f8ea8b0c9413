//! The HTTP round-trip, and the process-wide client that performs it.
//!
//! # Design
//! `CatalogProxy` is generic over `Transport` and receives it at construction,
//! so tests can swap in a canned transport and applications can share one
//! connection pool across many proxies. `initialize` returns that shared
//! `HttpTransport`, building it on first use only.

use std::future::Future;
use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single GET and reports the outcome as plain data.
///
/// Implementations return `Ok` for every response the server produced,
/// success or not; status interpretation belongs to `CatalogClient`. A
/// round-trip that never completed is `TransportFailed`, and a body that is
/// not UTF-8 is `DecodeFailed`.
pub trait Transport: Send + Sync {
    fn get(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// `reqwest`-backed transport that advertises `Accept: application/json` on
/// every request.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

static SHARED: OnceLock<HttpTransport> = OnceLock::new();

/// Return the process-wide transport, configuring it on the first call.
///
/// Later calls hand back the same instance; headers are never added twice
/// and no second pool is created.
pub fn initialize() -> &'static HttpTransport {
    SHARED.get_or_init(|| {
        HttpTransport::new(&ProxyConfig::default()).unwrap_or_else(|err| {
            // Requests still carry their own accept header.
            tracing::warn!(error = %err, "falling back to an unconfigured HTTP client");
            HttpTransport::from_client(reqwest::Client::new())
        })
    })
}

impl HttpTransport {
    /// Build a dedicated transport with the timeouts and user agent from
    /// `config`. Prefer [`initialize`] unless the defaults do not fit.
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one with custom TLS roots.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let reason = reason_phrase(&response);
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();

        // Bodies of failed requests are never decoded, so don't wait for them.
        // The rest must be strict UTF-8 whatever the Content-Type charset says.
        let body = if status.is_success() {
            let bytes = response.bytes().await?;
            String::from_utf8(bytes.to_vec()).map_err(ProxyError::decode)?
        } else {
            String::new()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
        })
    }
}

/// The phrase the server sent, when it differs from the canonical one;
/// hyper only records it in that case.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
