use clap::{Args, Parser, Subcommand};
use notifica_core::Locale;

#[derive(Parser)]
#[command(name = "notifica")]
#[command(about = "Read and manage a subscriber's Notifica inbox from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Overrides for the `NOTIFICA_*` environment variables.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Publishable key (pk_live_... or pk_test_...)
    #[arg(long, global = true, value_name = "KEY")]
    pub publishable_key: Option<String>,

    /// Subscriber whose inbox to read
    #[arg(long, global = true, value_name = "ID")]
    pub subscriber: Option<String>,

    /// Label language (pt-BR or en)
    #[arg(long, global = true, value_name = "LOCALE")]
    pub locale: Option<Locale>,

    /// Origin sent to the API
    #[arg(long, global = true, value_name = "URL")]
    pub origin: Option<String>,

    /// Notifications per page
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notifications, newest first
    #[command(alias = "ls")]
    List {
        /// Number of pages to fetch
        #[arg(short, long, default_value = "1")]
        pages: usize,
        /// Only show unread notifications
        #[arg(long)]
        unread: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the unread count
    Count {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every notification as read
    ReadAll,
    /// Poll and print the unread count whenever it changes
    Watch {
        /// Polling interval in milliseconds
        #[arg(long, value_name = "MS")]
        interval_ms: Option<i64>,
    },
}
