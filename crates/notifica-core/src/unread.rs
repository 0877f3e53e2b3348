//! Server-side unread badge count.
//!
//! Independent of the list cache: the count is whatever the server last
//! reported and is not adjusted when items are marked read locally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::endpoints;
use crate::models::UnreadCountResponse;
use crate::transport::{ApiClient, RequestOptions};
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CounterState {
    pub count: u64,
    pub fetched: bool,
    loads_in_flight: usize,
    pub error: Option<Error>,
}

impl CounterState {
    pub const fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }
}

#[derive(Clone)]
pub struct UnreadCounter {
    inner: Arc<CounterInner>,
}

struct CounterInner {
    client: ApiClient,
    state: Mutex<CounterState>,
    alive: AtomicBool,
}

impl UnreadCounter {
    pub fn new(client: ApiClient) -> Self {
        Self {
            inner: Arc::new(CounterInner {
                client,
                state: Mutex::new(CounterState::default()),
                alive: AtomicBool::new(true),
            }),
        }
    }

    /// Last count reported by the server; zero before the first fetch.
    pub fn count(&self) -> u64 {
        self.inner.state.lock().count
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().is_loading()
    }

    pub fn error(&self) -> Option<Error> {
        self.inner.state.lock().error.clone()
    }

    pub fn snapshot(&self) -> CounterState {
        self.inner.state.lock().clone()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    pub fn dispose(&self) {
        let _state = self.inner.state.lock();
        self.inner.alive.store(false, Ordering::Release);
    }

    /// Fetch the count, recording any failure instead of returning it.
    ///
    /// On failure the previous count is kept.
    pub async fn fetch(&self) {
        let _ = self.refresh().await;
    }

    /// Fetch the count and return the failure, if any.
    pub async fn refresh(&self) -> Result<u64> {
        if self.update(|state| state.loads_in_flight += 1).is_none() {
            return Ok(self.count());
        }

        let path = endpoints::unread_count(&self.inner.client.config().subscriber_id);
        let result = self
            .inner
            .client
            .request::<UnreadCountResponse>(&path, RequestOptions::get())
            .await
            .map(|response| response.data.count);

        match &result {
            Ok(count) => {
                tracing::debug!(count, "Fetched unread count");
                self.update(|state| {
                    state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
                    state.count = *count;
                    state.fetched = true;
                    state.error = None;
                });
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to fetch unread count");
                self.update(|state| {
                    state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
                    state.error = Some(error.clone());
                });
            }
        }
        result
    }

    fn update<R>(&self, apply: impl FnOnce(&mut CounterState) -> R) -> Option<R> {
        let mut state = self.inner.state.lock();
        if !self.inner.alive.load(Ordering::Acquire) {
            tracing::debug!("Ignoring update for disposed unread counter");
            return None;
        }
        Some(apply(&mut state))
    }
}

impl std::fmt::Debug for UnreadCounter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("UnreadCounter")
            .field("alive", &self.is_alive())
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}
