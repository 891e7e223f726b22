//! Scripted transport for exercising the fetcher without a network.
//!
//! Replies are consumed in call order. `Held` replies park until the test
//! releases them, which makes supersession races deterministic.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use url::Url;

use crate::error::TransportError;
use crate::transport::{CancelToken, Transport, TransportResponse};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with the given body.
    Ok(String),
    /// Arbitrary status with the given body.
    Status(u16, String),
    /// Transport-level failure.
    Error(String),
    /// 200 with the given body, but only after `release_one` is called.
    /// Cancellation beforehand wins and the body is never observed.
    Held(String),
    /// Never resolves on its own; only cancellation ends the call.
    Hang,
}

pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<Url>>,
    started: Semaphore,
    release: Semaphore,
}

impl MockTransport {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            started: Semaphore::new(0),
            release: Semaphore::new(0),
        })
    }

    /// Number of fetch calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every target that reached the transport, in call order.
    pub fn requested(&self) -> Vec<Url> {
        self.requested.lock().expect("mock transport poisoned").clone()
    }

    /// Wait until one more fetch call has entered the transport.
    pub async fn wait_for_call(&self) {
        self.started
            .acquire()
            .await
            .expect("mock transport closed")
            .forget();
    }

    /// Let one `Held` reply complete.
    pub fn release_one(&self) {
        self.release.add_permits(1);
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .expect("mock transport poisoned")
            .pop_front()
            .unwrap_or_else(|| MockReply::Error("mock reply script exhausted".to_string()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(
        &self,
        target: &Url,
        cancel: &CancelToken,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("mock transport poisoned")
            .push(target.clone());
        self.started.add_permits(1);

        match self.next_reply() {
            MockReply::Ok(body) => Ok(TransportResponse { status: 200, body }),
            MockReply::Status(status, body) => Ok(TransportResponse { status, body }),
            MockReply::Error(message) => Err(TransportError::Http(message)),
            MockReply::Held(body) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(TransportError::Cancelled),
                    permit = self.release.acquire() => {
                        permit.expect("mock transport closed").forget();
                        Ok(TransportResponse { status: 200, body })
                    }
                }
            }
            MockReply::Hang => {
                cancel.cancelled().await;
                Err(TransportError::Cancelled)
            }
        }
    }
}
