use notifica_core::{ApiClient, ResolvedConfig, UnreadCounter};
use serde_json::json;

use crate::error::CliError;

pub async fn run_count(config: ResolvedConfig, as_json: bool) -> Result<(), CliError> {
    let counter = UnreadCounter::new(ApiClient::new(config)?);
    let count = counter.refresh().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&json!({ "count": count }))?);
    } else {
        println!("{count}");
    }

    Ok(())
}
