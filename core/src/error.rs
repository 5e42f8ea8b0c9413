//! Error types for the catalog proxy.
//!
//! # Design
//! Every failure falls into one of three buckets: the server answered with a
//! non-2xx status, the body did not match the expected shape, or the
//! round-trip itself never completed. A missing character is *not* an error;
//! `get_character_by_name` reports it as `Ok(None)`.

use std::error::Error as StdError;

/// Errors returned by `CatalogClient` parse methods and `CatalogProxy`
/// operations.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The response status does not indicate success. No decoding was
    /// attempted.
    #[error("response status code does not indicate success: {status} ({reason})")]
    RequestFailed { status: u16, reason: String },

    /// The body is not UTF-8, not valid JSON, does not have the expected
    /// shape, or holds an unrecognized enumeration label.
    #[error("failed to decode response body: {0}")]
    DecodeFailed(#[source] Box<dyn StdError + Send + Sync>),

    /// The request could not be completed: connection refused, timeout,
    /// cancellation, or a broken body stream.
    #[error("transport failed: {0}")]
    TransportFailed(#[source] Box<dyn StdError + Send + Sync>),
}

impl ProxyError {
    /// Wrap any host transport error.
    pub fn transport(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        ProxyError::TransportFailed(err.into())
    }

    /// Wrap a body that is not UTF-8 or not the expected JSON shape.
    pub fn decode(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        ProxyError::DecodeFailed(err.into())
    }

    /// HTTP status carried by a `RequestFailed` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProxyError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::TransportFailed(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
