//! The fetch controller: cache-first, at most one request in flight, and a
//! superseded request can never overwrite or out-deliver its successor.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use derive_builder::Builder;
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::endpoint::{EndpointSelector, Locale};
use crate::error::{FetchError, TransportError};
use crate::query::QueryKey;
use crate::transport::{CancelHandle, CancelToken, Transport};

/// What one `request` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Fetched or cached content for the query.
    Content(String),
    /// The normalized query was empty; callers typically clear results.
    EmptyQuery,
    /// A newer request (or `dispose`) took over; this call is abandoned and
    /// its result must be ignored, not treated as a failure.
    Superseded,
}

/// Tuning knobs for a [`SearchFetcher`].
#[derive(Builder, Default, Clone, Debug)]
#[builder(public, setter(into))]
pub struct FetcherOptions {
    /// Wait this long before hitting the network so a keystroke burst
    /// collapses into its last query. Cache hits and empty queries are
    /// never delayed.
    #[builder(default)]
    pub debounce: Option<Duration>,
}

/// Post-processing applied to a successful response body before it is
/// cached and delivered, e.g. extracting one section of a larger page.
/// Cache and delivery always see the same filtered content.
pub trait ContentFilter: Send + Sync {
    fn apply(&self, body: String) -> String;
}

impl<F> ContentFilter for F
where
    F: Fn(String) -> String + Send + Sync,
{
    fn apply(&self, body: String) -> String {
        self(body)
    }
}

struct IdentityFilter;

impl ContentFilter for IdentityFilter {
    fn apply(&self, body: String) -> String {
        body
    }
}

/// Handle to the single outstanding network operation.
#[derive(Debug)]
struct InFlight {
    key: QueryKey,
    handle: CancelHandle,
}

impl InFlight {
    fn cancel(&self) {
        self.handle.cancel();
    }
}

#[derive(Default)]
struct FetcherState {
    cache: ResultCache,
    in_flight: Option<InFlight>,
}

/// Cached, cancellable fetch controller for predictive search.
///
/// Given a raw query it returns content for that query exactly once per
/// logical request: from cache when possible, otherwise through the
/// transport after cancelling whatever was previously in flight. Stale
/// responses are suppressed, failed requests never populate the cache, and
/// the fetcher stays usable after any error. Rendering is the caller's
/// concern; this type never touches UI state.
pub struct SearchFetcher<T> {
    transport: T,
    selector: Box<dyn EndpointSelector>,
    filter: Box<dyn ContentFilter>,
    options: FetcherOptions,
    state: Mutex<FetcherState>,
}

impl<T: Transport> SearchFetcher<T> {
    pub fn new(transport: T, selector: impl EndpointSelector + 'static) -> Self {
        Self {
            transport,
            selector: Box::new(selector),
            filter: Box::new(IdentityFilter),
            options: FetcherOptions::default(),
            state: Mutex::new(FetcherState::default()),
        }
    }

    pub fn with_options(mut self, options: FetcherOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_content_filter(mut self, filter: impl ContentFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Resolve `raw_query` to content.
    ///
    /// Cache hits and empty queries resolve immediately. A cache miss
    /// cancels any outstanding request before issuing its own, so at most
    /// one network call is ever in flight per fetcher.
    pub async fn request(
        &self,
        raw_query: &str,
        locale: &Locale,
    ) -> Result<SearchOutcome, FetchError> {
        let key = QueryKey::normalize(raw_query);
        if key.is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        {
            let state = self.state();
            if let Some(content) = state.cache.get(&key) {
                debug!("[{}] cache hit", key);
                return Ok(SearchOutcome::Content(content.to_string()));
            }
        }

        let (handle, token) = CancelHandle::new();
        {
            let mut state = self.state();
            if let Some(prev) = state.in_flight.take() {
                debug!("[{}] superseded by [{}]", prev.key, key);
                prev.cancel();
            }
            state.in_flight = Some(InFlight {
                key: key.clone(),
                handle,
            });
        }

        if let Some(delay) = self.options.debounce {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(SearchOutcome::Superseded),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let target = self.selector.resolve(locale, raw_query.trim());
        debug!("[{}] fetching {}", key, target);

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return Ok(SearchOutcome::Superseded),
            result = self.transport.fetch(&target, &token) => result,
        };

        match result {
            Ok(response) if response.is_success() => {
                let content = self.filter.apply(response.body);
                let mut state = self.state();
                if token.is_cancelled() {
                    return Ok(SearchOutcome::Superseded);
                }
                state.cache.insert(key.clone(), content.clone());
                Self::clear_own_slot(&mut state, &key);
                Ok(SearchOutcome::Content(content))
            }
            Ok(response) => {
                if !self.settle_failure(&key, &token) {
                    return Ok(SearchOutcome::Superseded);
                }
                warn!("[{}] endpoint returned status {}", key, response.status);
                Err(FetchError::Status(response.status))
            }
            Err(TransportError::Cancelled) => Ok(SearchOutcome::Superseded),
            Err(TransportError::Http(err)) => {
                if !self.settle_failure(&key, &token) {
                    return Ok(SearchOutcome::Superseded);
                }
                warn!("[{}] transport failure: {}", key, err);
                Err(FetchError::Transport(err))
            }
        }
    }

    /// Cancel any in-flight request silently. The cache is kept and the
    /// fetcher stays usable.
    pub fn dispose(&self) {
        let mut state = self.state();
        if let Some(in_flight) = state.in_flight.take() {
            debug!("[{}] disposed while in flight", in_flight.key);
            in_flight.cancel();
        }
    }

    /// Whether a previous request for an equivalent query already succeeded.
    pub fn is_cached(&self, raw_query: &str) -> bool {
        self.state().cache.contains(&QueryKey::normalize(raw_query))
    }

    pub fn cache_len(&self) -> usize {
        self.state().cache.len()
    }

    fn state(&self) -> MutexGuard<'_, FetcherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear the in-flight slot only if this request still owns it; a
    /// cancelled request must not clear its successor's slot.
    fn clear_own_slot(state: &mut FetcherState, key: &QueryKey) {
        if state.in_flight.as_ref().is_some_and(|f| f.key == *key) {
            state.in_flight = None;
        }
    }

    /// Returns false when the request was superseded while failing, in
    /// which case the failure must be swallowed.
    fn settle_failure(&self, key: &QueryKey, token: &CancelToken) -> bool {
        let mut state = self.state();
        if token.is_cancelled() {
            return false;
        }
        Self::clear_own_slot(&mut state, key);
        true
    }
}
