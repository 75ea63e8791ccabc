use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid listing config: {0}")]
    Config(String),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    #[error("Column is not sortable: {0}")]
    NotSortable(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, ListingError>;
