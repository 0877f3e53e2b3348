//! In-memory notification list for one subscriber.
//!
//! Pages are concatenated in server order and never re-sorted. Fetch
//! failures land in the error slot and leave the last good items in place.
//! Read marks are applied optimistically and confirmed in the background:
//! a failed single mark is undone, a failed bulk mark resyncs from the server.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::endpoints;
use crate::models::{ListResponse, MarkAllReadResponse, Notification, NotificationId};
use crate::transport::{ApiClient, RequestOptions};
use crate::{Error, Result};

/// Where the list sits in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing fetched yet
    Idle,
    /// Initial load or refresh in flight
    Loading,
    /// Items available, nothing in flight
    Ready,
    /// Next page in flight
    LoadingMore,
    /// Last fetch failed; previous items are kept
    Error,
}

/// Cached list contents and load flags.
#[derive(Debug, Clone)]
pub struct ListState {
    notifications: Vec<Notification>,
    offset: usize,
    has_more: bool,
    loaded: bool,
    loads_in_flight: usize,
    is_loading_more: bool,
    error: Option<Error>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            notifications: Vec::new(),
            offset: 0,
            has_more: true,
            loaded: false,
            loads_in_flight: 0,
            is_loading_more: false,
            error: None,
        }
    }
}

impl ListState {
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Offset the next page will be requested from.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    pub const fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub const fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id == *id)
    }

    /// Unread items among those currently cached.
    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| notification.is_unread())
            .count()
    }

    pub const fn phase(&self) -> ListPhase {
        if self.is_loading_more {
            ListPhase::LoadingMore
        } else if self.loads_in_flight > 0 {
            ListPhase::Loading
        } else if self.error.is_some() {
            ListPhase::Error
        } else if self.loaded {
            ListPhase::Ready
        } else {
            ListPhase::Idle
        }
    }

    /// Replace everything with the first page.
    fn replace_page(&mut self, page: Vec<Notification>, page_size: usize) {
        let returned = page.len();
        let mut seen = HashSet::with_capacity(returned);
        self.notifications = page
            .into_iter()
            .filter(|notification| seen.insert(notification.id.clone()))
            .collect();
        self.offset = returned;
        self.has_more = returned >= page_size;
        self.loaded = true;
        self.error = None;
    }

    /// Append the unseen part of a page fetched at `requested_offset`.
    ///
    /// The offset advances by the raw page length, not the appended count, so
    /// overlapping pages never stall pagination.
    fn append_page(
        &mut self,
        page: Vec<Notification>,
        requested_offset: usize,
        page_size: usize,
    ) -> usize {
        let returned = page.len();
        let mut seen = self
            .notifications
            .iter()
            .map(|notification| notification.id.clone())
            .collect::<HashSet<_>>();
        let before = self.notifications.len();
        self.notifications.extend(
            page.into_iter()
                .filter(|notification| seen.insert(notification.id.clone())),
        );
        self.offset = requested_offset + returned;
        self.has_more = returned >= page_size;
        self.loaded = true;
        self.error = None;
        self.notifications.len() - before
    }

    /// Tentatively stamp one unread item; returns what is needed to undo it.
    fn stamp_read(
        &mut self,
        id: &NotificationId,
        stamped_at: DateTime<Utc>,
    ) -> Option<ReadMark> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == *id)?;
        if notification.read_at.is_some() {
            return None;
        }
        notification.read_at = Some(stamped_at);
        Some(ReadMark {
            id: id.clone(),
            stamped_at,
        })
    }

    /// Undo a tentative stamp if it is still the item's current value.
    fn revert_read(&mut self, mark: &ReadMark) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == mark.id)
        else {
            return false;
        };
        if notification.read_at != Some(mark.stamped_at) {
            return false;
        }
        notification.read_at = None;
        true
    }

    /// Stamp every unread item with the same instant.
    fn stamp_all_unread(&mut self, stamped_at: DateTime<Utc>) -> usize {
        let mut stamped = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|notification| notification.is_unread())
        {
            notification.read_at = Some(stamped_at);
            stamped += 1;
        }
        stamped
    }

    fn finish_load(&mut self) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }
}

/// Pre-image of an optimistic single read mark.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReadMark {
    id: NotificationId,
    stamped_at: DateTime<Utc>,
}

/// Shared handle to a subscriber's notification list.
///
/// Cloning is cheap; all clones see the same state.
#[derive(Clone)]
pub struct NotificationList {
    inner: Arc<ListInner>,
}

struct ListInner {
    client: ApiClient,
    page_size: usize,
    state: Mutex<ListState>,
    alive: AtomicBool,
}

impl NotificationList {
    /// Empty list using the client's configured page size.
    pub fn new(client: ApiClient) -> Self {
        let page_size = client.config().page_size.max(1);
        Self {
            inner: Arc::new(ListInner {
                client,
                page_size,
                state: Mutex::new(ListState::default()),
                alive: AtomicBool::new(true),
            }),
        }
    }

    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    /// Point-in-time copy of the list state.
    pub fn snapshot(&self) -> ListState {
        self.inner.state.lock().clone()
    }

    /// Read the state without cloning it.
    pub fn with_state<R>(&self, read: impl FnOnce(&ListState) -> R) -> R {
        read(&self.inner.state.lock())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.with_state(|state| state.notifications.clone())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    /// Stop applying responses. In-flight requests still complete but their
    /// results are dropped.
    pub fn dispose(&self) {
        let _state = self.inner.state.lock();
        self.inner.alive.store(false, Ordering::Release);
    }

    /// Fetch the first page and replace the cached items.
    ///
    /// Failures are recorded in the error slot and not returned, which makes
    /// this safe to call from poll ticks.
    pub async fn load_initial(&self) {
        let _ = self.reload().await;
    }

    /// Same as `load_initial`, but the failure is also returned.
    pub async fn refresh(&self) -> Result<()> {
        self.reload().await
    }

    /// Fetch the next page and append its unseen items.
    ///
    /// No-op while a page is already loading or when the server has signalled
    /// the end of the list. Failures are recorded, not returned.
    pub async fn load_more(&self) {
        let offset = self
            .update(|state| {
                if state.is_loading_more || !state.has_more {
                    None
                } else {
                    state.is_loading_more = true;
                    Some(state.offset)
                }
            })
            .flatten();
        let Some(offset) = offset else {
            return;
        };

        let page_size = self.inner.page_size;
        match self.fetch_page(offset).await {
            Ok(page) => {
                let returned = page.len();
                let appended = self.update(|state| {
                    state.is_loading_more = false;
                    state.append_page(page, offset, page_size)
                });
                tracing::debug!(
                    offset,
                    returned,
                    ?appended,
                    "Loaded next notification page"
                );
            }
            Err(error) => {
                tracing::warn!(offset, %error, "Failed to load next notification page");
                self.update(|state| {
                    state.is_loading_more = false;
                    state.error = Some(error);
                });
            }
        }
    }

    /// Optimistically mark one notification read, then confirm with the API.
    ///
    /// The local stamp is visible before the request is sent. If the request
    /// fails the stamp is undone and the error is returned.
    pub async fn mark_read(&self, id: impl Into<NotificationId>) -> Result<()> {
        let id = id.into();
        let mark = self
            .update(|state| state.stamp_read(&id, Utc::now()))
            .flatten();

        let path = endpoints::mark_read(&self.inner.client.config().subscriber_id, &id);
        match self.inner.client.send(&path, RequestOptions::post()).await {
            Ok(_) => {
                tracing::debug!(notification_id = %id, "Notification marked read");
                Ok(())
            }
            Err(error) => {
                let reverted = mark
                    .and_then(|mark| self.update(|state| state.revert_read(&mark)))
                    .unwrap_or(false);
                tracing::warn!(
                    notification_id = %id,
                    reverted,
                    %error,
                    "Failed to mark notification read"
                );
                Err(error)
            }
        }
    }

    /// Optimistically mark every cached notification read.
    ///
    /// Returns the number of rows the server updated. On failure the list is
    /// refreshed from the server before the original error is returned.
    pub async fn mark_all_read(&self) -> Result<u64> {
        let stamped = self
            .update(|state| state.stamp_all_unread(Utc::now()))
            .unwrap_or(0);

        let path = endpoints::mark_all_read(&self.inner.client.config().subscriber_id);
        match self
            .inner
            .client
            .request::<MarkAllReadResponse>(&path, RequestOptions::post())
            .await
        {
            Ok(response) => {
                tracing::debug!(
                    stamped,
                    updated = response.data.updated,
                    "All notifications marked read"
                );
                Ok(response.data.updated)
            }
            Err(error) => {
                tracing::warn!(
                    stamped,
                    %error,
                    "Failed to mark all notifications read; resyncing"
                );
                if let Err(refresh_error) = self.refresh().await {
                    tracing::debug!(
                        %refresh_error,
                        "Resync after failed mark-all-read also failed"
                    );
                }
                Err(error)
            }
        }
    }

    async fn reload(&self) -> Result<()> {
        if self.update(|state| state.loads_in_flight += 1).is_none() {
            return Ok(());
        }

        let page_size = self.inner.page_size;
        match self.fetch_page(0).await {
            Ok(page) => {
                tracing::debug!(returned = page.len(), "Loaded first notification page");
                self.update(|state| {
                    state.finish_load();
                    state.replace_page(page, page_size);
                });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to load notifications");
                self.update(|state| {
                    state.finish_load();
                    state.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<Notification>> {
        let config = self.inner.client.config();
        let path =
            endpoints::notifications_page(&config.subscriber_id, self.inner.page_size, offset);
        let response = self
            .inner
            .client
            .request::<ListResponse>(&path, RequestOptions::get())
            .await?;
        Ok(response.data)
    }

    /// Apply a mutation unless the list has been disposed.
    fn update<R>(&self, apply: impl FnOnce(&mut ListState) -> R) -> Option<R> {
        let mut state = self.inner.state.lock();
        if !self.inner.alive.load(Ordering::Acquire) {
            tracing::debug!("Ignoring update for disposed notification list");
            return None;
        }
        Some(apply(&mut state))
    }
}

impl std::fmt::Debug for NotificationList {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotificationList")
            .field("page_size", &self.inner.page_size)
            .field("alive", &self.is_alive())
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::testing::{
        notification, page_body, page_of, read_notification, test_config, FakeTransport, Reply,
    };

    const LIST: &str = "/v1/subscribers/user-1/notifications";
    const FIRST_PAGE: &str = "/v1/subscribers/user-1/notifications?limit=20&offset=0";
    const SECOND_PAGE: &str = "/v1/subscribers/user-1/notifications?limit=20&offset=20";
    const READ_ALL: &str = "/v1/subscribers/user-1/notifications/read-all";

    fn list_with(transport: &Arc<FakeTransport>) -> NotificationList {
        NotificationList::new(ApiClient::with_transport(test_config(), transport.clone()))
    }

    fn ids(list: &NotificationList) -> Vec<String> {
        list.notifications()
            .iter()
            .map(|notification| notification.id.to_string())
            .collect()
    }

    fn read_path(id: &str) -> String {
        format!("{LIST}/{id}/read")
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let transport = FakeTransport::new();
        let state = list_with(&transport).snapshot();
        assert_eq!(state.phase(), ListPhase::Idle);
        assert!(state.notifications().is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn full_page_then_short_page_ends_pagination() {
        let transport = FakeTransport::new();
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..20)))
            .on(Method::GET, SECOND_PAGE, Reply::ok(page_body("n", 20..25)));
        let list = list_with(&transport);

        list.load_initial().await;
        let state = list.snapshot();
        assert_eq!(state.notifications().len(), 20);
        assert!(state.has_more());
        assert_eq!(state.offset(), 20);
        assert_eq!(state.phase(), ListPhase::Ready);

        list.load_more().await;
        let state = list.snapshot();
        assert_eq!(state.notifications().len(), 25);
        assert!(!state.has_more());
        assert_eq!(state.offset(), 25);
        assert_eq!(ids(&list)[24], "n24");
    }

    #[tokio::test]
    async fn load_more_skips_duplicates_but_advances_by_raw_count() {
        let transport = FakeTransport::new();
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..20)))
            .on(Method::GET, SECOND_PAGE, Reply::ok(page_body("n", 18..38)));
        let list = list_with(&transport);

        list.load_initial().await;
        list.load_more().await;

        let state = list.snapshot();
        assert_eq!(state.notifications().len(), 38);
        assert_eq!(state.offset(), 40);
        assert!(state.has_more());

        let unique = ids(&list).into_iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 38);
        assert_eq!(ids(&list)[20], "n20");
    }

    #[tokio::test]
    async fn load_more_is_noop_when_exhausted() {
        let transport = FakeTransport::new();
        transport.on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..3)));
        let list = list_with(&transport);

        list.load_initial().await;
        assert!(!list.snapshot().has_more());

        list.load_more().await;
        assert_eq!(transport.count(Method::GET, LIST), 1);
        assert_eq!(list.snapshot().notifications().len(), 3);
    }

    #[tokio::test]
    async fn load_more_is_noop_while_a_page_is_loading() {
        let transport = FakeTransport::new();
        let gate = Arc::new(Notify::new());
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..20)))
            .on(
                Method::GET,
                SECOND_PAGE,
                Reply::ok(page_body("n", 20..22)).gated(&gate),
            );
        let list = list_with(&transport);
        list.load_initial().await;

        let pending = tokio::spawn({
            let list = list.clone();
            async move { list.load_more().await }
        });
        transport.wait_for(Method::GET, SECOND_PAGE).await;
        assert_eq!(list.snapshot().phase(), ListPhase::LoadingMore);

        list.load_more().await;
        assert_eq!(transport.count(Method::GET, LIST), 2);

        gate.notify_one();
        pending.await.expect("load_more task");
        let state = list.snapshot();
        assert_eq!(state.notifications().len(), 22);
        assert!(!state.is_loading_more());
        assert_eq!(transport.count(Method::GET, LIST), 2);
    }

    #[tokio::test]
    async fn refresh_replaces_instead_of_appending() {
        let transport = FakeTransport::new();
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..20)))
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("fresh", 0..3)))
            .on(Method::GET, SECOND_PAGE, Reply::ok(page_body("n", 20..40)));
        let list = list_with(&transport);

        list.load_initial().await;
        list.load_more().await;
        assert_eq!(list.snapshot().notifications().len(), 40);

        list.refresh().await.expect("refresh");
        let state = list.snapshot();
        assert_eq!(ids(&list), vec!["fresh0", "fresh1", "fresh2"]);
        assert_eq!(state.offset(), 3);
        assert!(!state.has_more());
    }

    #[tokio::test]
    async fn failed_load_keeps_items_and_records_error() {
        let transport = FakeTransport::new();
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..2)))
            .on(Method::GET, FIRST_PAGE, Reply::status(502))
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..4)));
        let list = list_with(&transport);

        list.load_initial().await;
        list.load_initial().await;
        let state = list.snapshot();
        assert_eq!(state.notifications().len(), 2);
        assert_eq!(state.phase(), ListPhase::Error);
        assert!(matches!(state.error(), Some(Error::Api { status: 502, .. })));

        list.load_initial().await;
        let state = list.snapshot();
        assert_eq!(state.notifications().len(), 4);
        assert!(state.error().is_none());
        assert_eq!(state.phase(), ListPhase::Ready);
    }

    #[tokio::test]
    async fn refresh_returns_and_records_origin_error() {
        let transport = FakeTransport::new();
        transport.on(Method::GET, FIRST_PAGE, Reply::status(403));
        let list = list_with(&transport);

        let error = list.refresh().await.expect_err("403 should fail");
        assert!(matches!(error, Error::OriginNotAllowed { .. }));
        assert!(matches!(
            list.snapshot().error(),
            Some(Error::OriginNotAllowed { .. })
        ));
        assert!(!list.snapshot().is_loading());
    }

    #[tokio::test]
    async fn mark_read_applies_before_confirmation_and_keeps_client_stamp() {
        let transport = FakeTransport::new();
        let gate = Arc::new(Notify::new());
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..3)))
            .on(
                Method::POST,
                &read_path("n1"),
                Reply::ok(json!({"data": {"read_at": "1999-01-01T00:00:00Z"}})).gated(&gate),
            );
        let list = list_with(&transport);
        list.load_initial().await;

        let pending = tokio::spawn({
            let list = list.clone();
            async move { list.mark_read("n1").await }
        });
        transport.wait_for(Method::POST, &read_path("n1")).await;

        let stamped_at = list
            .with_state(|state| state.get("n1").and_then(|n| n.read_at))
            .expect("optimistically stamped");
        assert_eq!(list.snapshot().unread_count(), 2);

        gate.notify_one();
        pending.await.expect("mark_read task").expect("mark_read");

        let read_at = list.with_state(|state| state.get("n1").and_then(|n| n.read_at));
        assert_eq!(read_at, Some(stamped_at));
    }

    #[tokio::test]
    async fn mark_read_failure_reverts_and_returns_error() {
        let transport = FakeTransport::new();
        transport
            .on(Method::GET, FIRST_PAGE, Reply::ok(page_body("n", 0..3)))
            .on(Method::POST, &read_path("n1"), Reply::NetworkFailure);
        let list = list_with(&transport);
        list.load_initial().await;

        let error = list.mark_read("n1").await.expect_err("confirm fails");
        assert!(matches!(error, Error::Network(_)));
        assert!(list.with_state(|state| state.get("n1").is_some_and(Notification::is_unread)));
        assert_eq!(list.snapshot().unread_count(), 3);
    }

    #[tokio::test]
    async fn mark_read_on_read_item_still_confirms_and_keeps_timestamp() {
        let transport = FakeTransport::new();
        let already_read = read_notification("old");
        transport
            .on(
                Method::GET,
                FIRST_PAGE,
                Reply::ok(page_of(&[already_read.clone(), notification("new")])),
            )
            .on(Method::POST, &read_path("old"), Reply::status(500));
        let list = list_with(&transport);
        list.load_initial().await;

        assert!(list.mark_read("old").await.is_err());
        assert_eq!(transport.count(Method::POST, &read_path("old")), 1);
        let read_at = list.with_state(|state| state.get("old").and_then(|n| n.read_at));
        assert_eq!(read_at, already_read.read_at);
    }

    #[tokio::test]
    async fn mark_read_for_uncached_id_still_confirms() {
        let transport = FakeTransport::new();
        transport.on(Method::POST, &read_path("ghost"), Reply::ok(json!({})));
        let list = list_with(&transport);

        list.mark_read("ghost").await.expect("mark_read");
        assert_eq!(transport.count(Method::POST, &read_path("ghost")), 1);
    }

    #[tokio::test]
    async fn mark_all_read_uses_one_shared_timestamp() {
        let transport = FakeTransport::new();
        let previously_read = read_notification("r");
        transport
            .on(
                Method::GET,
                FIRST_PAGE,
                Reply::ok(page_of(&[
                    notification("a"),
                    previously_read.clone(),
                    notification("b"),
                ])),
            )
            .on(Method::POST, READ_ALL, Reply::ok(json!({"data": {"updated": 2}})));
        let list = list_with(&transport);
        list.load_initial().await;

        let updated = list.mark_all_read().await.expect("mark_all_read");
        assert_eq!(updated, 2);

        let state = list.snapshot();
        let a = state.get("a").and_then(|n| n.read_at);
        let b = state.get("b").and_then(|n| n.read_at);
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(state.get("r").and_then(|n| n.read_at), previously_read.read_at);
        assert_eq!(state.unread_count(), 0);
    }

    #[tokio::test]
    async fn mark_all_read_failure_resyncs_from_server() {
        let transport = FakeTransport::new();
        transport
            .on(
                Method::GET,
                FIRST_PAGE,
                Reply::ok(page_of(&[notification("a"), notification("b")])),
            )
            .on(
                Method::GET,
                FIRST_PAGE,
                Reply::ok(page_of(&[
                    notification("c"),
                    read_notification("a"),
                    notification("b"),
                ])),
            )
            .on(Method::POST, READ_ALL, Reply::status(500));
        let list = list_with(&transport);
        list.load_initial().await;

        let error = list.mark_all_read().await.expect_err("confirm fails");
        assert!(matches!(error, Error::Api { status: 500, .. }));

        assert_eq!(ids(&list), vec!["c", "a", "b"]);
        let state = list.snapshot();
        assert_eq!(state.unread_count(), 2);
        assert!(state.error().is_none());
        assert_eq!(transport.count(Method::GET, LIST), 2);
    }

    #[tokio::test]
    async fn disposed_list_drops_late_responses() {
        let transport = FakeTransport::new();
        let gate = Arc::new(Notify::new());
        transport.on(
            Method::GET,
            FIRST_PAGE,
            Reply::ok(page_body("n", 0..5)).gated(&gate),
        );
        let list = list_with(&transport);

        let pending = tokio::spawn({
            let list = list.clone();
            async move { list.load_initial().await }
        });
        transport.wait_for(Method::GET, FIRST_PAGE).await;
        list.dispose();
        gate.notify_one();
        pending.await.expect("load task");

        assert!(!list.is_alive());
        assert!(list.snapshot().notifications().is_empty());
        assert_eq!(list.snapshot().offset(), 0);
    }

    #[test]
    fn first_page_duplicates_collapse_to_one_entry() {
        let mut state = ListState::default();
        state.replace_page(
            vec![notification("x"), notification("y"), notification("x")],
            3,
        );
        assert_eq!(state.notifications().len(), 2);
        assert_eq!(state.offset(), 3);
        assert!(state.has_more());
    }

    #[test]
    fn revert_leaves_newer_server_value_alone() {
        let mut state = ListState::default();
        state.replace_page(vec![notification("x")], 20);
        let id = NotificationId::new("x");
        let mark = state
            .stamp_read(&id, Utc::now())
            .expect("unread item gets stamped");

        let server_value = crate::testing::fixed_time();
        state.notifications[0].read_at = Some(server_value);
        assert!(!state.revert_read(&mark));
        assert_eq!(state.notifications()[0].read_at, Some(server_value));
    }
}
