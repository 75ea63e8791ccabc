//! # Settings
//!
//! Engine-wide presentation settings, managed by [`confique`] with layered loading.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `LISTING_PLACEHOLDER`, `LISTING_DATE_FORMAT`, ...
//! 2. **Explicit file**: passed with `--settings`.
//! 3. **User file**: `settings.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `placeholder` | `—` | Glyph shown for null or missing values |
//! | `date_format` | `%-m/%-d/%Y` | chrono format for `date` cells |
//! | `currency_symbol` | `$` | Prefix for `currency` cells |
//! | `default_page_size` | `20` | Page size for listings that declare none |
//! | `color` | `true` | Styled terminal output in the CLI |

use crate::error::{ListingError, Result};
use chrono::format::{Item, StrftimeItems};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    #[config(default = "—", env = "LISTING_PLACEHOLDER")]
    pub placeholder: String,

    #[config(default = "%-m/%-d/%Y", env = "LISTING_DATE_FORMAT")]
    pub date_format: String,

    #[config(default = "$", env = "LISTING_CURRENCY_SYMBOL")]
    pub currency_symbol: String,

    #[config(default = 20, env = "LISTING_PAGE_SIZE")]
    pub default_page_size: u32,

    #[config(default = true, env = "LISTING_COLOR")]
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            placeholder: "—".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
            currency_symbol: "$".to_string(),
            default_page_size: 20,
            color: true,
        }
    }
}

impl Settings {
    /// Load settings from the environment, an optional explicit file and the
    /// user's config directory, on top of the compiled defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Settings::builder().env();
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ListingError::Config(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            builder = builder.file(path);
        }
        if let Some(dirs) = ProjectDirs::from("com", "listing", "listing") {
            builder = builder.file(dirs.config_dir().join("settings.toml"));
        }
        let settings: Settings = builder.load()?;
        validate_date_format(&settings.date_format)?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Page size to use when a listing does not declare one.
    pub fn page_size(&self, declared: Option<u32>) -> u32 {
        declared
            .filter(|size| *size > 0)
            .unwrap_or(self.default_page_size)
            .max(1)
    }
}

/// Reject chrono format strings with unknown specifiers, which would
/// otherwise fail at display time.
pub fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ListingError::Config(format!("invalid date_format: {format:?}")));
    }
    Ok(())
}
