//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state between
//! calls. Each query is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! All four queries share one decode path, parameterized only by the result
//! shape: a single record or a sequence of records.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::{ProxyError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Allegiance, Character, Trilogy};

/// Characters that cannot appear verbatim inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the catalog API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. `CatalogProxy` pairs it with a `Transport`; any other
/// HTTP stack can drive it the same way.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `name` travels as one percent-encoded path segment. The names `.` and
    /// `..` cannot be addressed: URL parsing resolves them (encoded or not) as
    /// dot segments before the request leaves the host.
    pub fn build_get_character_by_name(&self, name: &str) -> HttpRequest {
        self.build_get("Characters/ByName", Some(name))
    }

    pub fn build_list_characters(&self) -> HttpRequest {
        self.build_get("Characters", None)
    }

    pub fn build_list_characters_by_allegiance(&self, allegiance: Allegiance) -> HttpRequest {
        self.build_get("Characters/AllByAllegiance", Some(allegiance.label()))
    }

    pub fn build_list_characters_by_trilogy(&self, trilogy: Trilogy) -> HttpRequest {
        self.build_get("Characters/AllByTrilogy", Some(trilogy.label()))
    }

    /// Parse the response to `build_get_character_by_name`.
    ///
    /// 204, an empty body, and a JSON `null` all mean "no such character" and
    /// yield `Ok(None)`.
    pub fn parse_get_character_by_name(&self, response: HttpResponse) -> Result<Option<Character>> {
        decode(response)
    }

    /// Parse the response to any of the `build_list_*` requests.
    pub fn parse_list_characters(&self, response: HttpResponse) -> Result<Vec<Character>> {
        decode::<Vec<Character>>(response).map(Option::unwrap_or_default)
    }

    /// `filter` is percent-encoded as one path segment.
    fn build_get(&self, path: &str, filter: Option<&str>) -> HttpRequest {
        let mut url = format!("{}/{path}", self.base_url);
        if let Some(filter) = filter {
            url.push('/');
            url.extend(utf8_percent_encode(filter, PATH_SEGMENT));
        }
        HttpRequest {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Validate the status, then decode the body. An empty or `null` body decodes
/// to `None`; unknown JSON fields are dropped.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>> {
    check_status(&response)?;
    if response.status == 204 || response.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body).map_err(ProxyError::decode)
}

/// Map non-2xx status codes to `RequestFailed`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ProxyError::RequestFailed {
        status: response.status,
        reason: response.reason.clone(),
    })
}
