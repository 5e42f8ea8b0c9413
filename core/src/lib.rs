//! Async client for the Star Wars character catalog.
//!
//! # Overview
//! `CatalogProxy` turns typed queries (by name, all, by allegiance, by
//! trilogy) into GET requests against the catalog's REST API and decodes the
//! JSON replies into `Character` values.
//!
//! # Design
//! - `CatalogClient` is the deterministic core: `build_*` produces an
//!   `HttpRequest`, `parse_*` validates and decodes an `HttpResponse`. It
//!   never touches the network, so any host HTTP stack can drive it.
//! - `Transport` is the I/O seam. `transport::initialize` yields the shared
//!   `reqwest`-backed implementation, which `CatalogProxy` receives at
//!   construction rather than reaching for a global.
//! - Failures surface as one `ProxyError` type; a missing character is
//!   `Ok(None)`, not an error.
//!
//! ```no_run
//! use starwars_proxy::{Allegiance, CatalogProxy};
//!
//! # async fn run() -> starwars_proxy::Result<()> {
//! let proxy = CatalogProxy::new("http://localhost:8002/api/");
//! for rebel in proxy.list_characters_by_allegiance(Allegiance::Rebellion).await? {
//!     println!("{} (jedi: {})", rebel.name, rebel.is_jedi);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod transport;
pub mod types;

pub use client::CatalogClient;
pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
pub use http::{HttpRequest, HttpResponse};
pub use proxy::CatalogProxy;
pub use transport::{HttpTransport, Transport};
pub use types::{Allegiance, Character, Trilogy, MAX_NAME_LEN};
