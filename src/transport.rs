//! Network-call abstraction and its cooperative cancellation signal.

use async_trait::async_trait;
use tokio::sync::watch;
use url::Url;

use crate::error::TransportError;

/// Fires the cancellation signal for one in-flight call.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn new() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx })
    }

    /// Fire the signal. Idempotent; late receivers still observe it.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Cooperative cancellation signal threaded through a transport call.
///
/// A dropped [`CancelHandle`] reads as cancelled, so disposing or dropping
/// the owning fetcher aborts the in-flight call without extra bookkeeping.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal fires or its handle is gone.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-call abstraction: given a target and a cancellation token, yield
/// raw text content or an error.
///
/// Implementations must honor the token: once it fires, resolve with
/// [`TransportError::Cancelled`] so the superseded call's eventual response
/// or error is never observed.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        target: &Url,
        cancel: &CancelToken,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch(
        &self,
        target: &Url,
        cancel: &CancelToken,
    ) -> Result<TransportResponse, TransportError> {
        (**self).fetch(target, cancel).await
    }
}

/// reqwest-backed transport.
///
/// Timeouts, user agent and TLS are configuration of the injected client,
/// see [`crate::config::build_http_client`].
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        target: &Url,
        cancel: &CancelToken,
    ) -> Result<TransportResponse, TransportError> {
        let request = async {
            let response = self.client.get(target.as_str()).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, TransportError>(TransportResponse { status, body })
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            result = request => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_unset() {
        let (_handle, token) = CancelHandle::new();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_is_observed_by_clones() {
        let (handle, token) = CancelHandle::new();
        let clone = token.clone();
        handle.cancel();
        assert!(token.is_cancelled());
        clone.cancelled().await;
    }

    #[tokio::test]
    async fn test_dropped_handle_reads_as_cancelled() {
        let (handle, token) = CancelHandle::new();
        drop(handle);
        token.cancelled().await;
    }

    #[test]
    fn test_success_status_range() {
        let ok = TransportResponse { status: 204, body: String::new() };
        let not_found = TransportResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
