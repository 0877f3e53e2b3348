//! notifica-core - Client library for the Notifica in-app notification API
//!
//! This crate contains the configuration resolver, authenticated transport,
//! the subscriber-scoped notification list and unread counter caches, and the
//! polling session that keeps them fresh. Used by the `notifica` CLI and by
//! embedders that render an inbox.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod labels;
pub mod models;
pub mod notifications;
pub mod poller;
pub mod session;
pub mod transport;
pub mod unread;

#[cfg(test)]
mod testing;

pub use config::{ClientConfig, ConfigResolver, ResolvedConfig};
pub use error::{Error, Result};
pub use labels::{format_relative_time, LabelOverrides, Labels, Locale};
pub use models::{Notification, NotificationId};
pub use notifications::{ListPhase, ListState, NotificationList};
pub use poller::PollScheduler;
pub use session::NotificaSession;
pub use transport::{ApiClient, HttpTransport, Transport};
pub use unread::{CounterState, UnreadCounter};
