use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments for loggly-rsyslog
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "loggly-rsyslog")]
#[command(version, about = "Initialize Loggly logging through rsyslog")]
pub struct Cli {
    /// The Loggly account name (default from LOGGLY_ACCOUNT)
    #[arg(long, short = 'a')]
    pub account: Option<String>,

    /// The Loggly authentication token (default from LOGGLY_TOKEN)
    #[arg(long, short = 't')]
    pub token: Option<String>,

    /// Additional tags (default from LOGGLY_TAGS)
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,

    /// Hostname reported to Loggly (default from LOGGLY_HOSTNAME)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Remove the Loggly configuration
    #[arg(long, short = 'r')]
    pub remove: bool,

    /// Show what would be done without doing it
    #[arg(long)]
    pub dry_run: bool,

    /// TOML file overriding paths, service and collector settings
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

impl Cli {
    /// One-line usage text, printed when credentials are missing
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}
