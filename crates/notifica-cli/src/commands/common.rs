use chrono::{DateTime, Utc};
use notifica_core::{
    format_relative_time, ClientConfig, ConfigResolver, Labels, Notification, NotificationId,
    ResolvedConfig,
};
use serde::Serialize;

use crate::cli::ConnectionArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct NotificationListItem {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub action_url: Option<String>,
    pub unread: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub inserted_at: DateTime<Utc>,
    pub relative_time: String,
}

impl From<ConnectionArgs> for ClientConfig {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            api_url: args.api_url,
            publishable_key: args.publishable_key,
            subscriber_id: args.subscriber,
            locale: args.locale,
            page_size: args.page_size,
            origin: args.origin,
            ..Self::default()
        }
    }
}

/// Environment first, then command-line flags on top.
pub fn resolve_config(args: ConnectionArgs) -> Result<ResolvedConfig, CliError> {
    resolve_config_with(ClientConfig::from_env()?, args)
}

pub fn resolve_config_with(
    env: ClientConfig,
    args: ConnectionArgs,
) -> Result<ResolvedConfig, CliError> {
    let config = env.merge(args.into());
    Ok(ConfigResolver::new().resolve(config)?)
}

pub fn normalize_notification_id(raw: &str) -> Result<NotificationId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNotificationId);
    }
    Ok(NotificationId::new(trimmed))
}

pub fn notification_to_list_item(
    notification: &Notification,
    now: DateTime<Utc>,
    labels: &Labels,
) -> NotificationListItem {
    NotificationListItem {
        id: notification.id.to_string(),
        title: notification.title.clone(),
        body: notification.body.clone(),
        action_url: notification.action_url.clone(),
        unread: notification.is_unread(),
        read_at: notification.read_at,
        inserted_at: notification.inserted_at,
        relative_time: format_relative_time(notification.inserted_at, now, labels),
    }
}

pub fn format_notification_lines(
    notifications: &[Notification],
    now: DateTime<Utc>,
    labels: &Labels,
) -> Vec<String> {
    if notifications.is_empty() {
        return vec![
            labels.empty_title.to_string(),
            labels.empty_description.to_string(),
        ];
    }

    notifications
        .iter()
        .map(|notification| {
            let marker = if notification.is_unread() { '*' } else { ' ' };
            let time = format_relative_time(notification.inserted_at, now, labels);
            format!(
                "{marker} {}  {}  ({time})",
                notification.id, notification.title
            )
        })
        .collect()
}
