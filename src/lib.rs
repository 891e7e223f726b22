//! # presearch
//!
//! `presearch` is the fetch controller behind a search-as-you-type UI: a
//! debounced, cancellable, cached bridge between raw user queries and a
//! remote suggest endpoint. It owns the response cache and the single
//! in-flight request, and guarantees that a superseded request can never
//! overwrite state produced by a newer one. Rendering the returned content
//! is the caller's job; this crate never touches UI state.
//!
//! ## Features
//!
//! - **Cache-first**: queries that normalize to the same key share one
//!   network call for the lifetime of the fetcher.
//! - **At most one request in flight**: starting a new fetch cancels the
//!   previous one; its late response or error has no observable effect.
//! - **Cooperative cancellation**: an explicit token threaded through the
//!   transport, not a shared mutable flag.
//! - **Caller-owned routing**: an [`EndpointSelector`] maps (locale, query)
//!   to the request target, with a storefront-shaped default.
//! - **Optional debounce**: collapse keystroke bursts into the last query.
//!
//! ## Getting Started
//!
//! ```no_run
//! use presearch::reqwest;
//! use presearch::url::Url;
//! use presearch::{HttpTransport, Locale, SearchFetcher, SearchOutcome, SectionEndpoint};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = SectionEndpoint::new(Url::parse("https://shop.example/search/suggest")?)
//!     .with_param("section_id", "predictive-search")
//!     .with_override("ar", Url::parse("https://shop.example/ar/search")?);
//! let fetcher = SearchFetcher::new(HttpTransport::new(reqwest::Client::new()), endpoint);
//!
//! match fetcher.request("red shoes", &Locale::new("en")).await? {
//!     SearchOutcome::Content(html) => println!("{html}"),
//!     SearchOutcome::EmptyQuery | SearchOutcome::Superseded => {}
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `query`: query normalization into cache keys.
//! - `cache`: the in-memory result cache.
//! - `endpoint`: locale-aware request-target selection.
//! - `transport`: the network-call abstraction and cancellation signal.
//! - `fetcher`: the controller tying the above together.
//! - `config`: YAML-backed HTTP client configuration.
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod query;
pub mod test_utils;
pub mod transport;

pub use cache::ResultCache;
pub use config::{ConfigError, HttpClientParams};
pub use endpoint::{EndpointSelector, Locale, SectionEndpoint};
pub use error::{FetchError, TransportError};
pub use fetcher::{
    ContentFilter, FetcherOptions, FetcherOptionsBuilder, SearchFetcher, SearchOutcome,
};
pub use query::QueryKey;
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{CancelHandle, CancelToken, Transport, TransportResponse};

// re-export
pub use async_trait;
#[cfg(feature = "http")]
pub use reqwest;
pub use tracing;
pub use url;
