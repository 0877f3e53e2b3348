//! Subscriber-scoped API paths.

use crate::models::NotificationId;

/// `/v1/subscribers/{subscriber}/notifications`
pub fn notifications(subscriber_id: &str) -> String {
    format!(
        "/v1/subscribers/{}/notifications",
        urlencoding::encode(subscriber_id)
    )
}

pub fn notifications_page(subscriber_id: &str, limit: usize, offset: usize) -> String {
    format!(
        "{}?limit={limit}&offset={offset}",
        notifications(subscriber_id)
    )
}

pub fn unread_count(subscriber_id: &str) -> String {
    format!("{}/unread-count", notifications(subscriber_id))
}

pub fn mark_read(subscriber_id: &str, id: &NotificationId) -> String {
    format!(
        "{}/{}/read",
        notifications(subscriber_id),
        urlencoding::encode(id.as_str())
    )
}

pub fn mark_all_read(subscriber_id: &str) -> String {
    format!("{}/read-all", notifications(subscriber_id))
}
