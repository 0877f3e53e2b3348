use std::time::Duration;

use notifica_core::config::DEFAULT_POLLING_INTERVAL_MS;
use notifica_core::{NotificaSession, ResolvedConfig};
use tokio::time::{interval, MissedTickBehavior};

use crate::error::CliError;

/// How often the cached count is checked for changes; network polling runs on
/// the session's own interval.
const DISPLAY_REFRESH: Duration = Duration::from_millis(250);

pub async fn run_watch(
    mut config: ResolvedConfig,
    interval_ms: Option<i64>,
) -> Result<(), CliError> {
    config.polling_interval_ms = watch_interval_ms(interval_ms, config.polling_interval_ms);
    let labels = config.label_table();

    let mut session = NotificaSession::new(config)?;
    session.start().await;
    if let Some(error) = session.unread().error() {
        eprintln!("Warning: {error}");
    }

    let mut shown = None;
    let mut ticker = interval(DISPLAY_REFRESH);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            _ = ticker.tick() => {
                let state = session.unread().snapshot();
                if !state.fetched {
                    continue;
                }
                if let Some(count) = count_change(shown, state.count) {
                    println!("{}: {count}", labels.notifications);
                    shown = Some(count);
                }
            }
        }
    }

    session.close();
    Ok(())
}

/// Explicit interval, else the configured one, else the default when polling
/// is disabled (watching without polling would never update).
pub fn watch_interval_ms(explicit: Option<i64>, configured: i64) -> i64 {
    match explicit {
        Some(ms) if ms > 0 => ms,
        _ if configured > 0 => configured,
        _ => DEFAULT_POLLING_INTERVAL_MS,
    }
}

/// The count to print, if it differs from what was last shown.
pub fn count_change(shown: Option<u64>, current: u64) -> Option<u64> {
    (shown != Some(current)).then_some(current)
}
