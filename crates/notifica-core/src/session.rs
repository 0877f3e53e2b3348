//! A subscriber session: list cache, unread counter and polling bound to one
//! resolved configuration.

use std::sync::Arc;

use crate::config::ResolvedConfig;
use crate::labels::Labels;
use crate::notifications::NotificationList;
use crate::poller::PollScheduler;
use crate::transport::{ApiClient, HttpTransport, Transport};
use crate::unread::UnreadCounter;
use crate::Result;

/// Owns everything that depends on the configured subscriber.
///
/// Changing the subscriber, endpoint, key, origin or page size through
/// [`NotificaSession::reconfigure`] discards the caches and starts over;
/// responses that arrive for the old scope are dropped.
pub struct NotificaSession {
    config: ResolvedConfig,
    transport: Arc<dyn Transport>,
    list: NotificationList,
    counter: UnreadCounter,
    poller: PollScheduler,
    closed: bool,
}

impl NotificaSession {
    /// Session over the default HTTP transport.
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(config: ResolvedConfig, transport: Arc<dyn Transport>) -> Self {
        let client = ApiClient::with_transport(config.clone(), transport.clone());
        Self {
            config,
            transport,
            list: NotificationList::new(client.clone()),
            counter: UnreadCounter::new(client),
            poller: PollScheduler::new(),
            closed: false,
        }
    }

    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub const fn notifications(&self) -> &NotificationList {
        &self.list
    }

    pub const fn unread(&self) -> &UnreadCounter {
        &self.counter
    }

    /// Label table for the configured locale, overrides applied.
    pub fn labels(&self) -> Labels {
        self.config.label_table()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_armed()
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Load the first page and the unread count together, then arm polling.
    ///
    /// Polling is armed whether or not the initial loads succeeded, so a
    /// session that starts offline recovers on the next tick.
    pub async fn start(&mut self) {
        if self.closed {
            tracing::debug!("Ignoring start on closed session");
            return;
        }

        tracing::info!(
            subscriber_id = %self.config.subscriber_id,
            api_url = %self.config.api_url,
            "Starting notification session"
        );
        tokio::join!(self.list.load_initial(), self.counter.fetch());
        self.arm_polling(false);
    }

    /// Apply a new configuration.
    ///
    /// A different scope rebuilds and restarts everything. A different polling
    /// interval only re-arms the timer. Anything else is just stored.
    pub async fn reconfigure(&mut self, config: ResolvedConfig) {
        if self.closed {
            tracing::debug!("Ignoring reconfigure on closed session");
            return;
        }

        let rebuild = !self.config.same_scope(&config);
        let interval_changed = self.config.polling_interval_ms != config.polling_interval_ms;
        self.config = config;

        if rebuild {
            tracing::info!(
                subscriber_id = %self.config.subscriber_id,
                "Session scope changed; resetting caches"
            );
            self.poller.disarm();
            self.list.dispose();
            self.counter.dispose();

            let client = ApiClient::with_transport(self.config.clone(), self.transport.clone());
            self.list = NotificationList::new(client.clone());
            self.counter = UnreadCounter::new(client);
            self.start().await;
        } else if interval_changed {
            self.arm_polling(true);
        }
    }

    /// Stop polling and drop any responses still in flight.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.poller.disarm();
        self.list.dispose();
        self.counter.dispose();
        tracing::debug!(subscriber_id = %self.config.subscriber_id, "Session closed");
    }

    fn arm_polling(&mut self, keep_phase: bool) {
        let list = self.list.clone();
        let counter = self.counter.clone();
        let job = move || {
            let list = list.clone();
            let counter = counter.clone();
            async move {
                tokio::join!(list.load_initial(), counter.fetch());
            }
        };

        let period = self.config.polling_interval();
        if keep_phase {
            self.poller.rearm(period, job);
        } else {
            self.poller.arm(period, job);
        }
    }
}

impl Drop for NotificaSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for NotificaSession {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotificaSession")
            .field("config", &self.config)
            .field("polling", &self.poller.period())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
