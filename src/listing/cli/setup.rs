use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "listing",
    bin_name = "listing",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Render configuration-driven entity listings from an address", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (TOML), layered over the user settings
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub settings: Option<PathBuf>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a listing page for an address
    Render {
        /// Listing config (TOML)
        config: PathBuf,

        /// Records of the listing, or of its first tab (JSON array or {"items": [...]})
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Records of another tab
        #[arg(long = "tab-data", value_name = "TAB=FILE", value_parser = parse_tab_data)]
        tab_data: Vec<(String, PathBuf)>,

        /// The user's drafts (JSON array)
        #[arg(long, value_name = "FILE")]
        drafts: Option<PathBuf>,

        /// Delete one of the drafts (confirmed) before rendering
        #[arg(long, value_name = "ID", requires = "drafts")]
        delete_draft: Option<String>,

        /// Fields searched by search filters (default: every text field)
        #[arg(long = "search-field", value_name = "PATH")]
        search_fields: Vec<String>,

        /// Current address (query string or path with query)
        #[arg(long, default_value = "")]
        address: String,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,

        /// Disable styled output
        #[arg(long)]
        no_color: bool,

        /// Reference time for relative dates (RFC 3339)
        #[arg(long, value_name = "TIMESTAMP")]
        now: Option<DateTime<Utc>>,
    },

    /// Print the address that results from a user action
    Patch {
        /// Listing config (TOML)
        config: PathBuf,

        /// Current address
        #[arg(long, default_value = "")]
        address: String,

        #[command(flatten)]
        action: PatchAction,
    },

    /// Print the page window for a result total
    Window {
        /// Total number of records
        #[arg(long)]
        total: u64,

        /// Records per page (default: settings)
        #[arg(long)]
        page_size: Option<u32>,

        /// Current page
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Print the window as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PatchAction {
    /// Set a filter value
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Option<(String, String)>,

    /// Click a column header
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Go to a page
    #[arg(long, value_name = "N")]
    pub page: Option<u32>,

    /// Go to the next page
    #[arg(long)]
    pub next: bool,

    /// Go to the previous page
    #[arg(long)]
    pub prev: bool,

    /// Switch tabs
    #[arg(long, value_name = "ID")]
    pub tab: Option<String>,

    /// Reset every filter
    #[arg(long)]
    pub clear: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

fn parse_tab_data(raw: &str) -> Result<(String, PathBuf), String> {
    parse_assignment(raw).map(|(tab, path)| (tab, PathBuf::from(path)))
}
