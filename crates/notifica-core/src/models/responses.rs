//! Response envelopes for the subscriber notification endpoints

use serde::{Deserialize, Serialize};

use super::Notification;

/// `GET /notifications` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Notification>,
}

/// `GET /notifications/unread-count` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub data: UnreadCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

/// `POST /notifications/read-all` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    pub data: MarkAllRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAllRead {
    pub updated: u64,
}
