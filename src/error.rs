use thiserror::Error;

/// Failure of a single transport call.
///
/// `Cancelled` is terminal inside the fetcher: a superseded request is
/// abandoned, not failed, so this variant never reaches callers.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,
    #[error("http error: {0}")]
    Http(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err.to_string())
    }
}

/// Failure surfaced to the caller of [`crate::SearchFetcher::request`].
///
/// Carries enough detail for the caller to pick a UI response, e.g. close
/// the results panel on a `Status` or keep it open and retry later on a
/// `Transport` failure. The fetcher itself never retries.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("endpoint returned status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
}
