//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dblapi - discordbots.org stats, lookups and vote webhooks
#[derive(Parser, Debug)]
#[command(name = "dblapi")]
#[command(about = "discordbots.org stats, lookups and vote webhooks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// TOML options file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory token, defaults to $DBL_TOKEN
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the vote webhook until Ctrl-C
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Shared secret the directory sends
        #[arg(long)]
        auth: Option<String>,

        /// Webhook path
        #[arg(long)]
        path: Option<String>,
    },

    #[command(flatten)]
    Directory(DirectoryCommands),

    /// Print a widget url
    Widget {
        /// Bot id
        id: String,

        /// Colour overrides
        #[command(flatten)]
        colors: WidgetArgs,
    },
}

/// Commands that talk to the directory API
#[derive(Subcommand, Debug)]
pub enum DirectoryCommands {
    /// Show a user profile
    User {
        /// User id
        id: String,
    },

    /// Show a bot listing
    Bot {
        /// Bot id
        id: String,
    },

    /// Show the last 1000 voters of a bot
    Votes {
        /// Bot id
        id: String,
    },

    /// Show a bot's posted stats
    Stats {
        /// Bot id
        id: String,
    },

    /// Check whether a user voted in the last 12 hours
    CheckVote {
        /// Bot id
        bot_id: String,

        /// User id
        user_id: String,
    },

    /// Search the listing
    Search {
        /// Search expression, e.g. lib:serenity
        #[arg(long)]
        search: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Number of bots to skip
        #[arg(long)]
        offset: Option<u32>,

        /// Sort field, prefix with - for descending
        #[arg(long)]
        sort: Option<String>,

        /// Comma separated fields to include
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Post a server count
    PostStats {
        /// Bot id, defaults to bot_id from the options file
        #[arg(long)]
        bot_id: Option<String>,

        /// Server count to report
        #[arg(long)]
        count: u64,
    },
}

/// Widget colours, hex without `#`.
#[derive(Args, Debug, Default)]
pub struct WidgetArgs {
    /// Top colour
    #[arg(long)]
    pub topcolor: Option<String>,
    /// Middle colour
    #[arg(long)]
    pub middlecolor: Option<String>,
    /// Username colour
    #[arg(long)]
    pub usernamecolor: Option<String>,
    /// Certified badge colour
    #[arg(long)]
    pub certifiedcolor: Option<String>,
    /// Data colour
    #[arg(long)]
    pub datacolor: Option<String>,
    /// Label colour
    #[arg(long)]
    pub labelcolor: Option<String>,
    /// Highlight colour
    #[arg(long)]
    pub highlightcolor: Option<String>,
}
