//! Data models for Notifica

mod notification;
mod responses;

pub use notification::{Notification, NotificationId};
pub use responses::{
    ListResponse, MarkAllRead, MarkAllReadResponse, UnreadCount, UnreadCountResponse,
};
