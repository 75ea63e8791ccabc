//! # Listing Configuration
//!
//! A [`ListingConfig`] is the static description of one listing page, owned by the
//! host and immutable for the lifetime of a page view. It is plain data, so it can
//! live in a TOML file next to the host's code:
//!
//! ```toml
//! title = "Jobs"
//! base_route = "/recruiting/jobs"
//! page_size = 20
//! status_field = "status"
//!
//! [entity_name]
//! singular = "job"
//! plural = "jobs"
//!
//! [[filters]]
//! key = "search"
//! label = "Jobs"
//! kind = "search"
//!
//! [[columns]]
//! key = "title"
//! header = "Job Title"
//! sortable = true
//!
//! [status_styles.open]
//! label = "Open"
//! tone = "info"
//! ```
//!
//! Behavior that cannot be expressed as data (custom cell renderers, custom cards,
//! custom tab bodies, the data sources themselves) is bound at runtime by name or
//! by tab id; see [`crate::render::Hooks`] and [`crate::view::ListingView`].

use crate::address::{AddressSchema, RESERVED_KEYS};
use crate::drafts::DraftConfig;
use crate::error::{ListingError, Result};
use crate::filters::{declare, FilterDescriptor};
use crate::format::{FormatKind, StatusStyles};
use crate::tabs::TabDescriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityName {
    pub singular: String,
    pub plural: String,
}

impl Default for EntityName {
    fn default() -> Self {
        Self::new("item", "items")
    }
}

impl EntityName {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    pub fn for_count(&self, count: u64) -> &str {
        if count == 1 {
            &self.singular
        } else {
            &self.plural
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub header: String,
    #[serde(default)]
    pub format: Option<FormatKind>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Align,
    /// Name of a cell hook that replaces default formatting.
    #[serde(default)]
    pub render: Option<String>,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            format: None,
            sortable: false,
            align: Align::Left,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn format(mut self, format: FormatKind) -> Self {
        self.format = Some(format);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn render_with(mut self, hook: impl Into<String>) -> Self {
        self.render = Some(hook.into());
        self
    }
}

/// A labelled field on a default card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaField {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub format: Option<FormatKind>,
}

/// Card layout: either a named custom renderer, or the default card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub renderer: Option<String>,
    #[serde(default)]
    pub title_field: Option<String>,
    #[serde(default)]
    pub subtitle_field: Option<String>,
    #[serde(default)]
    pub meta: Vec<MetaField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    /// Dotted key into the response stats (`total`, `byStatus.active`).
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub format: Option<FormatKind>,
    #[serde(default)]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAction {
    pub label: String,
    pub href: String,
}

/// What to show when a fetch succeeds with zero items.
///
/// `filtered_description` is used instead of `description` when any filter is
/// active; `{key}` placeholders are replaced by the active value of that filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filtered_description: Option<String>,
    #[serde(default)]
    pub action: Option<LinkAction>,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "Nothing here yet".to_string(),
            description: None,
            filtered_description: Some("Try adjusting your search or filters".to_string()),
            action: None,
        }
    }
}

/// The layout a panel renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout<'a> {
    Table(&'a [Column]),
    Cards(&'a CardConfig),
    Custom(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entity_name: EntityName,
    pub base_route: String,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub filters: Vec<FilterDescriptor>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub card: Option<CardConfig>,
    #[serde(default)]
    pub status_field: Option<String>,
    #[serde(default)]
    pub status_styles: StatusStyles,
    #[serde(default)]
    pub stat_cards: Vec<StatCard>,
    #[serde(default)]
    pub empty_state: Option<EmptyState>,
    #[serde(default)]
    pub primary_action: Option<LinkAction>,
    /// Column key → backend sort column.
    #[serde(default)]
    pub sort_fields: IndexMap<String, String>,
    #[serde(default)]
    pub default_sort_field: Option<String>,
    #[serde(default)]
    pub drafts: Option<DraftConfig>,
    #[serde(default)]
    pub tabs: Vec<TabDescriptor>,
}

impl ListingConfig {
    pub fn new(title: impl Into<String>, base_route: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            entity_name: EntityName::default(),
            base_route: base_route.into(),
            page_size: None,
            filters: Vec::new(),
            columns: Vec::new(),
            card: None,
            status_field: None,
            status_styles: StatusStyles::new(),
            stat_cards: Vec::new(),
            empty_state: None,
            primary_action: None,
            sort_fields: IndexMap::new(),
            default_sort_field: None,
            drafts: None,
            tabs: Vec::new(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ListingConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), title = %config.title, "listing config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ListingError::Config("title is required".into()));
        }
        if self.base_route.trim().is_empty() {
            return Err(ListingError::Config("base_route is required".into()));
        }
        if self.page_size == Some(0) {
            return Err(ListingError::Config("page_size must be positive".into()));
        }

        let mut keys = HashSet::new();
        for filter in &self.filters {
            if RESERVED_KEYS.contains(&filter.key.as_str()) {
                return Err(ListingError::Config(format!(
                    "filter key {:?} is reserved",
                    filter.key
                )));
            }
            if filter.key.is_empty() || !keys.insert(filter.key.as_str()) {
                return Err(ListingError::Config(format!(
                    "filter key {:?} must be unique and non-empty",
                    filter.key
                )));
            }
        }

        let mut ids = HashSet::new();
        for tab in &self.tabs {
            if tab.id.is_empty() || !ids.insert(tab.id.as_str()) {
                return Err(ListingError::Config(format!(
                    "tab id {:?} must be unique and non-empty",
                    tab.id
                )));
            }
            if self.layout_for(Some(tab)).is_none() {
                return Err(ListingError::Config(format!(
                    "tab {:?} has no columns, card or custom renderer",
                    tab.id
                )));
            }
        }

        if self.tabs.is_empty() && self.layout_for(None).is_none() {
            return Err(ListingError::Config(
                "either columns or a card layout is required".into(),
            ));
        }

        if let Some(card) = &self.card {
            if card.renderer.is_none() && card.title_field.is_none() {
                return Err(ListingError::Config(
                    "card needs a renderer or a title_field".into(),
                ));
            }
        }
        Ok(())
    }

    /// Address parameters this listing understands.
    pub fn address_schema(&self) -> AddressSchema {
        let schema = declare(&self.filters, AddressSchema::new());
        match self.tabs.first() {
            Some(tab) => schema.with_default_tab(&tab.id),
            None => schema,
        }
    }

    /// Pick a panel's layout: tab-specific first, then the listing's own.
    /// Table and card modes are never mixed within one panel.
    pub fn layout_for<'a>(&'a self, tab: Option<&'a TabDescriptor>) -> Option<Layout<'a>> {
        if let Some(tab) = tab {
            if let Some(renderer) = &tab.custom_renderer {
                return Some(Layout::Custom(renderer));
            }
            if let Some(columns) = tab.columns.as_deref().filter(|columns| !columns.is_empty()) {
                return Some(Layout::Table(columns));
            }
            if let Some(card) = &tab.card {
                return Some(Layout::Cards(card));
            }
        }
        if !self.columns.is_empty() {
            Some(Layout::Table(&self.columns))
        } else {
            self.card.as_ref().map(Layout::Cards)
        }
    }

    /// Column definitions of a panel, when it renders as a table.
    pub fn columns_for<'a>(&'a self, tab: Option<&'a TabDescriptor>) -> &'a [Column] {
        match self.layout_for(tab) {
            Some(Layout::Table(columns)) => columns,
            _ => &[],
        }
    }

    pub fn tab(&self, id: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Whether `column` is a sortable column of the panel's table.
    pub fn is_sortable(&self, tab: Option<&TabDescriptor>, column: &str) -> bool {
        self.columns_for(tab)
            .iter()
            .any(|candidate| candidate.key == column && candidate.sortable)
    }

    /// Backend sort column for a column key.
    pub fn sort_field(&self, column: Option<&str>) -> Option<String> {
        let mapped = column.and_then(|column| {
            if self.sort_fields.is_empty() {
                Some(column.to_string())
            } else {
                self.sort_fields.get(column).cloned()
            }
        });
        mapped.or_else(|| self.default_sort_field.clone())
    }
}
