use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sendarr")]
#[command(author, version, about = "Send IMDb movie pages to Radarr")]
pub struct Cli {
    /// Path to settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send the movie on an IMDb title page to Radarr
    Send {
        /// IMDb title page URL
        #[arg(required = true)]
        url: String,

        /// Read the page from a saved HTML file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,

        /// Quality profile to use, by id or name (defaults to the configured default)
        #[arg(short, long)]
        profile: Option<String>,

        /// Do not show desktop notifications
        #[arg(long)]
        no_notify: bool,
    },

    /// Extract movie details from an IMDb title page
    Extract {
        /// IMDb title page URL
        #[arg(required = true)]
        url: String,

        /// Read the page from a saved HTML file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,

        /// Output the page response as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or edit the Radarr settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Initialize the settings file without overwriting existing values
    Init,

    /// Check the connection to Radarr
    Check,

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show the stored settings
    Show,

    /// Validate and save settings
    Save(SaveArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// Radarr base URL
    #[arg(long, default_value = "")]
    pub url: String,

    /// Radarr API key
    #[arg(long, default_value = "")]
    pub api_key: String,

    /// Root folder on the Radarr server
    #[arg(long, default_value = "")]
    pub root_folder: String,

    /// Quality profiles, one "Name:ID" per line
    #[arg(long, conflicts_with = "profiles_file")]
    pub profiles: Option<String>,

    /// Read quality profiles from a file, one "Name:ID" per line
    #[arg(long)]
    pub profiles_file: Option<PathBuf>,

    /// Default quality profile id
    #[arg(long)]
    pub default_profile: Option<i64>,
}
