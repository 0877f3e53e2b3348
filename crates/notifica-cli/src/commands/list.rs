use chrono::Utc;
use notifica_core::{ApiClient, NotificationList, ResolvedConfig};

use crate::commands::common::{
    format_notification_lines, notification_to_list_item, NotificationListItem,
};
use crate::error::CliError;

pub async fn run_list(
    config: ResolvedConfig,
    pages: usize,
    unread_only: bool,
    as_json: bool,
) -> Result<(), CliError> {
    if pages == 0 {
        return Err(CliError::InvalidPageCount);
    }

    let labels = config.label_table();
    let list = NotificationList::new(ApiClient::new(config)?);
    list.refresh().await?;

    for _ in 1..pages {
        if !list.with_state(notifica_core::ListState::has_more) {
            break;
        }
        list.load_more().await;
        if let Some(error) = list.with_state(|state| state.error().cloned()) {
            return Err(error.into());
        }
    }

    let notifications = list
        .notifications()
        .into_iter()
        .filter(|notification| !unread_only || notification.is_unread())
        .collect::<Vec<_>>();
    let now = Utc::now();

    if as_json {
        let json_items = notifications
            .iter()
            .map(|notification| notification_to_list_item(notification, now, &labels))
            .collect::<Vec<NotificationListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        println!("{}", labels.notifications);
        for line in format_notification_lines(&notifications, now, &labels) {
            println!("{line}");
        }
    }

    Ok(())
}
