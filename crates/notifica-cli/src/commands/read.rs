use notifica_core::{ApiClient, NotificationList, ResolvedConfig};

use crate::commands::common::normalize_notification_id;
use crate::error::CliError;

pub async fn run_read(config: ResolvedConfig, id: &str) -> Result<(), CliError> {
    let id = normalize_notification_id(id)?;
    let list = NotificationList::new(ApiClient::new(config)?);
    list.mark_read(id.clone()).await?;

    println!("Marked {id} as read");
    Ok(())
}

pub async fn run_read_all(config: ResolvedConfig) -> Result<(), CliError> {
    let list = NotificationList::new(ApiClient::new(config)?);
    let updated = list.mark_all_read().await?;

    println!("Marked {updated} notification(s) as read");
    Ok(())
}
