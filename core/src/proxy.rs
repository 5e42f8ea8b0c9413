//! Async facade that runs `CatalogClient` requests over a `Transport`.
//!
//! # Design
//! Every operation is the same three steps: build the request, await the
//! round-trip, parse the response. `execute` owns the middle step and the
//! logging around it; the operations differ only in which `build_*` and
//! `parse_*` they hand it. There is no caching and no retry: each call is
//! exactly one GET.

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::config::ProxyConfig;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{self, HttpTransport, Transport};
use crate::types::{Allegiance, Character, Trilogy};

/// Typed, async access to the character catalog.
///
/// Holds no mutable state, so a single proxy can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct CatalogProxy<T = HttpTransport> {
    client: CatalogClient,
    transport: T,
}

impl CatalogProxy<HttpTransport> {
    /// Proxy for `base_url` over the process-wide transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, transport::initialize().clone())
    }

    /// Proxy with its own transport, built from `config`'s timeouts and user
    /// agent.
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        Ok(Self::with_transport(
            &config.base_url,
            HttpTransport::new(config)?,
        ))
    }
}

impl Default for CatalogProxy<HttpTransport> {
    fn default() -> Self {
        Self::new(&ProxyConfig::default().base_url)
    }
}

impl<T: Transport> CatalogProxy<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: CatalogClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// The character called `name`, or `None` if the catalog has no such
    /// character.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_character_by_name(&self, name: &str) -> Result<Option<Character>> {
        let request = self.client.build_get_character_by_name(name);
        self.execute(request, CatalogClient::parse_get_character_by_name)
            .await
    }

    /// Every character in the catalog, in server order.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_characters(&self) -> Result<Vec<Character>> {
        let request = self.client.build_list_characters();
        self.execute(request, CatalogClient::parse_list_characters)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_characters_by_allegiance(
        &self,
        allegiance: Allegiance,
    ) -> Result<Vec<Character>> {
        let request = self.client.build_list_characters_by_allegiance(allegiance);
        self.execute(request, CatalogClient::parse_list_characters)
            .await
    }

    /// Characters first seen in `trilogy`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_characters_by_trilogy(&self, trilogy: Trilogy) -> Result<Vec<Character>> {
        let request = self.client.build_list_characters_by_trilogy(trilogy);
        self.execute(request, CatalogClient::parse_list_characters)
            .await
    }

    async fn execute<R>(
        &self,
        request: HttpRequest,
        parse: fn(&CatalogClient, HttpResponse) -> Result<R>,
    ) -> Result<R> {
        debug!(url = %request.url, "sending catalog request");
        let response = self
            .transport
            .get(request)
            .await
            .inspect_err(|err| warn!(error = %err, "catalog request did not complete"))?;
        debug!(status = response.status, "catalog responded");
        parse(&self.client, response)
            .inspect_err(|err| warn!(error = %err, "catalog response rejected"))
    }
}
