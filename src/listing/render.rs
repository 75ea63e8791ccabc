//! # Rendering
//!
//! Turns fetched records plus the listing's configuration into a serializable
//! view model ([`RenderedListing`]). No terminal or markup output happens here;
//! the CLI paints the view model with templates, and a host UI can do the same
//! from the JSON form.
//!
//! ## Body States
//!
//! A panel body is exactly one of [`Body::Loading`], [`Body::Errored`],
//! [`Body::Empty`] or a populated layout. Loading, empty and errored are never
//! conflated: an empty page is a successful fetch with zero items and gets the
//! configured empty state, with the active filter values available to its text.
//!
//! ## Layouts
//!
//! - **Table**: one header per column (with its sort indicator) and one [`Row`]
//!   of formatted [`Cell`]s per record.
//! - **Cards**: either a named card hook per record, or the default card built
//!   from `title_field`, `subtitle_field`, the status field and meta fields.
//! - **Custom**: a named panel hook renders the whole body.
//!
//! ## Hooks
//!
//! Behavior that cannot be data lives in [`Hooks`], looked up by the names the
//! configuration uses. A name with no registered hook degrades to the default
//! rendering (cells, cards) or to an inline error (panels); it never panics.

use crate::address::ParamValue;
use crate::config::{Align, CardConfig, Column, EmptyState, EntityName, LinkAction, StatCard};
use crate::drafts::DraftRow;
use crate::filters::{FilterDescriptor, FilterKind, FilterOption, FilterValues};
use crate::format::{format_value, plain, Cell, FormatContext, FormatKind};
use crate::model::Entity;
use crate::pagination::PageWindow;
use crate::sort::{SortOrder, SortState};
use crate::source::{stat, Stats};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

type CellHook<E> = Box<dyn Fn(&E, Option<&Value>) -> String>;
type CardHook<E> = Box<dyn Fn(&E) -> CardView>;
type PanelHook<E> = Box<dyn Fn(&[E]) -> String>;

/// Named host renderers.
pub struct Hooks<E> {
    cells: HashMap<String, CellHook<E>>,
    cards: HashMap<String, CardHook<E>>,
    panels: HashMap<String, PanelHook<E>>,
}

impl<E> Default for Hooks<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Hooks<E> {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            cards: HashMap::new(),
            panels: HashMap::new(),
        }
    }

    /// Cell renderer, referenced by a column's `render`.
    pub fn with_cell<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&E, Option<&Value>) -> String + 'static,
    {
        self.cells.insert(name.into(), Box::new(hook));
        self
    }

    /// Card renderer, referenced by a card's `renderer`.
    pub fn with_card<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&E) -> CardView + 'static,
    {
        self.cards.insert(name.into(), Box::new(hook));
        self
    }

    /// Whole-panel renderer, referenced by a tab's `custom_renderer`.
    pub fn with_panel<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&[E]) -> String + 'static,
    {
        self.panels.insert(name.into(), Box::new(hook));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub sorted: Option<SortOrder>,
    pub align: Align,
}

impl HeaderCell {
    /// Label with the sort indicator appended, if sorted.
    pub fn decorated(&self) -> String {
        match self.sorted {
            Some(order) => format!("{} {}", self.label, order.indicator()),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaView {
    pub label: Option<String>,
    pub value: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub status: Option<Cell>,
    pub meta: Vec<MetaView>,
}

impl CardView {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            status: None,
            meta: Vec::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_meta(mut self, label: impl Into<String>, value: Cell) -> Self {
        self.meta.push(MetaView {
            label: Some(label.into()),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub key: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyView {
    pub title: String,
    pub description: Option<String>,
    pub action: Option<LinkAction>,
    pub filters: Vec<ActiveFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Body {
    Loading,
    Errored { message: String },
    Empty(EmptyView),
    Table(TableView),
    Cards { cards: Vec<CardView> },
    Custom { content: String },
}

impl Body {
    pub fn label(&self) -> &'static str {
        match self {
            Body::Loading => "loading",
            Body::Errored { .. } => "errored",
            Body::Empty(_) => "empty",
            Body::Table(_) => "table",
            Body::Cards { .. } => "cards",
            Body::Custom { .. } => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCardView {
    pub key: String,
    pub label: String,
    pub value: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterView {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
    pub value: ParamValue,
    pub active: bool,
    pub placeholder: Option<String>,
    pub options: Vec<FilterOption>,
    /// Display text of the current value (option label for selects).
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: String,
    pub label: String,
    pub active: bool,
    /// Fetch state of the tab's own adapter.
    pub state: &'static str,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerView {
    #[serde(flatten)]
    pub window: PageWindow,
    pub summary: String,
}

/// Everything a host needs to paint one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedListing {
    pub title: String,
    pub description: Option<String>,
    pub entity_name: EntityName,
    pub primary_action: Option<LinkAction>,
    /// Canonical query string of the current address.
    pub address: String,
    pub stat_cards: Vec<StatCardView>,
    /// `None` when the active panel hides its filter bar.
    pub filters: Option<Vec<FilterView>>,
    pub tabs: Vec<TabView>,
    /// `None` when the drafts section is hidden.
    pub drafts: Option<Vec<DraftRow>>,
    pub body: Body,
    pub pagination: Option<PagerView>,
}

/// Render a table. Header sort markers follow the address sort.
pub fn table<E: Entity>(
    items: &[E],
    columns: &[Column],
    sort: &SortState,
    hooks: &Hooks<E>,
    ctx: &FormatContext<'_>,
) -> TableView {
    let headers = columns
        .iter()
        .map(|column| HeaderCell {
            key: column.key.clone(),
            label: column.header.clone(),
            sortable: column.sortable,
            sorted: sort.order_for(&column.key),
            align: column.align,
        })
        .collect();

    let rows = items
        .iter()
        .map(|item| Row {
            id: item.id().into_owned(),
            cells: columns
                .iter()
                .map(|column| cell(item, column, hooks, ctx))
                .collect(),
        })
        .collect();

    TableView { headers, rows }
}

fn cell<E: Entity>(item: &E, column: &Column, hooks: &Hooks<E>, ctx: &FormatContext<'_>) -> Cell {
    let value = item.field(&column.key);
    if let Some(name) = &column.render {
        match hooks.cells.get(name) {
            Some(hook) => return Cell::text(hook(item, value)),
            None => tracing::warn!(hook = %name, column = %column.key, "no cell hook registered"),
        }
    }
    format_value(column.format, value, ctx)
}

/// Render cards, through the named card hook when one is configured.
pub fn cards<E: Entity>(
    items: &[E],
    card: &CardConfig,
    status_field: Option<&str>,
    hooks: &Hooks<E>,
    ctx: &FormatContext<'_>,
) -> Vec<CardView> {
    let hook = card.renderer.as_ref().and_then(|name| {
        let hook = hooks.cards.get(name);
        if hook.is_none() {
            tracing::warn!(hook = %name, "no card hook registered");
        }
        hook
    });
    items
        .iter()
        .map(|item| match hook {
            Some(hook) => hook(item),
            None => default_card(item, card, status_field, ctx),
        })
        .collect()
}

fn default_card<E: Entity>(
    item: &E,
    card: &CardConfig,
    status_field: Option<&str>,
    ctx: &FormatContext<'_>,
) -> CardView {
    let text = |field: &Option<String>| {
        field
            .as_deref()
            .and_then(|field| item.field(field))
            .map(|value| plain(value, ctx))
            .filter(|cell| !cell.empty)
            .map(|cell| cell.text)
    };

    CardView {
        id: item.id().into_owned(),
        title: text(&card.title_field).unwrap_or_else(|| ctx.settings.placeholder.clone()),
        subtitle: text(&card.subtitle_field),
        status: status_field
            .and_then(|field| item.field(field))
            .map(|value| format_value(Some(FormatKind::Status), Some(value), ctx))
            .filter(|cell| !cell.empty),
        meta: card
            .meta
            .iter()
            .map(|meta| MetaView {
                label: meta.label.clone(),
                value: format_value(meta.format, item.field(&meta.key), ctx),
            })
            .collect(),
    }
}

/// Render a custom panel body.
pub fn custom<E>(items: &[E], name: &str, hooks: &Hooks<E>) -> Body {
    match hooks.panels.get(name) {
        Some(hook) => Body::Custom {
            content: hook(items),
        },
        None => Body::Errored {
            message: format!("No renderer registered for {name:?}"),
        },
    }
}

/// The empty state, with filter-aware text when filters are active.
pub fn empty(
    empty_state: &EmptyState,
    filters: &[FilterDescriptor],
    values: &FilterValues,
) -> EmptyView {
    let active: Vec<ActiveFilter> = filters
        .iter()
        .filter_map(|filter| {
            let value = values.get(&filter.key).filter(|_| values.is_active(&filter.key))?;
            Some(ActiveFilter {
                key: filter.key.clone(),
                label: filter.label.clone(),
                value: display_value(filter, value),
            })
        })
        .collect();

    let description = match (&empty_state.filtered_description, active.is_empty()) {
        (Some(filtered), false) => Some(interpolate(filtered, &active)),
        _ => empty_state.description.clone(),
    };

    EmptyView {
        title: empty_state.title.clone(),
        description,
        action: empty_state.action.clone(),
        filters: active,
    }
}

fn interpolate(template: &str, filters: &[ActiveFilter]) -> String {
    filters.iter().fold(template.to_string(), |text, filter| {
        text.replace(&format!("{{{}}}", filter.key), &filter.value)
    })
}

fn display_value(filter: &FilterDescriptor, value: &ParamValue) -> String {
    match (filter.kind, value) {
        (FilterKind::Select, ParamValue::Text(text)) => filter
            .option_label(text)
            .map_or_else(|| text.clone(), str::to_string),
        (FilterKind::Toggle, ParamValue::Flag(true)) => "Yes".to_string(),
        (FilterKind::Toggle, ParamValue::Flag(false)) => "No".to_string(),
        _ => value.to_string(),
    }
}

/// The filter bar: every declared filter with its resolved value.
pub fn filter_bar(filters: &[FilterDescriptor], values: &FilterValues) -> Vec<FilterView> {
    filters
        .iter()
        .map(|filter| {
            let value = values
                .get(&filter.key)
                .cloned()
                .unwrap_or_else(|| filter.kind.noop());
            FilterView {
                key: filter.key.clone(),
                label: filter.label.clone(),
                kind: filter.kind,
                display: display_value(filter, &value),
                active: values.is_active(&filter.key),
                value,
                placeholder: filter.placeholder.clone(),
                options: filter.options.clone(),
            }
        })
        .collect()
}

/// Resolve stat cards against a response's stats. Missing stats show the placeholder.
pub fn stat_cards(cards: &[StatCard], stats: Option<&Stats>, ctx: &FormatContext<'_>) -> Vec<StatCardView> {
    cards
        .iter()
        .map(|card| {
            let value = stats.and_then(|stats| stat(stats, &card.key));
            let mut cell = format_value(card.format, value, ctx);
            if let (Some(suffix), false) = (&card.suffix, cell.empty) {
                cell.text.push_str(suffix);
            }
            StatCardView {
                key: card.key.clone(),
                label: card.label.clone(),
                value: cell,
            }
        })
        .collect()
}
