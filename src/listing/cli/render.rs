//! # Rendering Module
//!
//! Turns the library's view model into terminal text. The view model is already
//! fully formatted; what happens here is layout: column widths, truncation,
//! alignment and picking a style name for every piece of text. The result is
//! handed to the templates in `templates/`, which only arrange lines.
//!
//! ## Table Layout
//!
//! Every column is as wide as its widest cell (header included), capped at
//! [`MAX_CELL_WIDTH`]. Longer text is truncated with [`ELLIPSIS`]. Columns are
//! separated by [`COLUMN_GAP`] and aligned per their configured [`Align`].

use super::styles::names;
use super::templates::{LISTING_TEMPLATE, MESSAGES_TEMPLATE, WINDOW_TEMPLATE};
use listing::config::Align;
use listing::drafts::{MessageLevel, Notification};
use listing::error::Result;
use listing::format::{Cell, Tone};
use listing::pagination::PageWindow;
use listing::render::{Body, RenderedListing, TableView};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MAX_CELL_WIDTH: usize = 32;
pub const COLUMN_GAP: &str = "  ";
pub const ELLIPSIS: &str = "…";

const LISTING: &str = "listing";
const WINDOW: &str = "window";
const MESSAGES: &str = "messages";

fn environment(use_color: bool) -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        super::styles::apply(&name, &value.to_string(), use_color)
    });
    env.add_template(LISTING, LISTING_TEMPLATE)?;
    env.add_template(WINDOW, WINDOW_TEMPLATE)?;
    env.add_template(MESSAGES, MESSAGES_TEMPLATE)?;
    Ok(env)
}

fn render_template<T: Serialize>(name: &str, data: &T, use_color: bool) -> Result<String> {
    let env = environment(use_color)?;
    let output = env.get_template(name)?.render(data)?;
    Ok(output)
}

#[derive(Debug, Serialize)]
struct Styled {
    text: String,
    style: &'static str,
}

impl Styled {
    fn new(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatLine {
    label: String,
    value: String,
    style: &'static str,
}

#[derive(Debug, Serialize)]
struct FilterLine {
    label: String,
    display: String,
    style: &'static str,
}

#[derive(Debug, Serialize)]
struct DraftLine {
    name: String,
    progress: String,
    touched: String,
    route: String,
}

#[derive(Debug, Serialize)]
struct CardLine {
    title: String,
    status: String,
    status_style: &'static str,
    subtitle: Option<String>,
    meta: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
struct ListingData {
    title: String,
    description: Option<String>,
    action: Option<String>,
    stats: Vec<StatLine>,
    drafts: Vec<DraftLine>,
    tabs: Vec<Styled>,
    filters: Vec<FilterLine>,
    state: &'static str,
    message: Option<String>,
    detail: Option<String>,
    header: Vec<Styled>,
    rows: Vec<Vec<Styled>>,
    cards: Vec<CardLine>,
    content: Option<String>,
    summary: Option<String>,
    pager: Option<String>,
}

fn tone_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "tone_neutral",
        Tone::Info => "tone_info",
        Tone::Success => "tone_success",
        Tone::Warning => "tone_warning",
        Tone::Danger => "tone_danger",
        Tone::Accent => "tone_accent",
    }
}

fn cell_style(cell: &Cell) -> &'static str {
    match (&cell.badge, cell.empty) {
        (Some(badge), _) => tone_style(badge.tone),
        (None, true) => names::PLACEHOLDER,
        (None, false) => names::CELL,
    }
}

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Pad `text` to exactly `width` columns.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let text = truncate_to_width(text, width);
    let fill = width.saturating_sub(text.width());
    match align {
        Align::Left => format!("{text}{}", " ".repeat(fill)),
        Align::Right => format!("{}{text}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

fn column_widths(table: &TableView) -> Vec<usize> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest_cell = table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| cell.text.width())
                .max()
                .unwrap_or(0);
            header.decorated().width().max(widest_cell).min(MAX_CELL_WIDTH)
        })
        .collect()
}

fn layout_table(table: &TableView, data: &mut ListingData) {
    let widths = column_widths(table);
    let last = widths.len().saturating_sub(1);
    let gap = |i: usize| if i == last { "" } else { COLUMN_GAP };

    data.header = table
        .headers
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(i, (header, &width))| {
            let text = pad(&header.decorated(), width, header.align);
            Styled::new(format!("{text}{}", gap(i)), names::HEADER)
        })
        .collect();

    data.rows = table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (header, &width))| match row.cells.get(i) {
                    Some(cell) => {
                        let text = pad(&cell.text, width, header.align);
                        Styled::new(format!("{text}{}", gap(i)), cell_style(cell))
                    }
                    None => Styled::new(" ".repeat(width), names::CELL),
                })
                .collect()
        })
        .collect();
}

fn listing_data(view: &RenderedListing) -> ListingData {
    let mut data = ListingData {
        title: view.title.clone(),
        description: view.description.clone(),
        action: view
            .primary_action
            .as_ref()
            .map(|action| format!("+ {} ({})", action.label, action.href)),
        state: view.body.label(),
        ..ListingData::default()
    };

    data.stats = view
        .stat_cards
        .iter()
        .map(|card| StatLine {
            label: card.label.clone(),
            value: card.value.text.clone(),
            style: if card.value.empty {
                names::PLACEHOLDER
            } else {
                names::STAT
            },
        })
        .collect();

    if let Some(drafts) = &view.drafts {
        data.drafts = drafts
            .iter()
            .map(|draft| DraftLine {
                name: draft.name.clone(),
                progress: match draft.step {
                    Some((step, total)) => format!("{}% (step {step}/{total})", draft.progress),
                    None => format!("{}%", draft.progress),
                },
                touched: draft.last_touched.clone(),
                route: draft.resume_route.clone(),
            })
            .collect();
    }

    data.tabs = view
        .tabs
        .iter()
        .map(|tab| {
            let text = match tab.count {
                Some(count) => format!(" {} ({count}) ", tab.label),
                None => format!(" {} ", tab.label),
            };
            let style = if tab.active {
                names::TAB_ACTIVE
            } else {
                names::TAB
            };
            Styled::new(text, style)
        })
        .collect();

    if let Some(filters) = &view.filters {
        data.filters = filters
            .iter()
            .map(|filter| FilterLine {
                label: filter.label.clone(),
                display: if filter.active {
                    filter.display.clone()
                } else {
                    filter.placeholder.clone().unwrap_or_else(|| "any".to_string())
                },
                style: if filter.active {
                    names::FILTER_ACTIVE
                } else {
                    names::FILTER
                },
            })
            .collect();
    }

    match &view.body {
        Body::Loading => {}
        Body::Errored { message } => data.message = Some(message.clone()),
        Body::Empty(empty) => {
            data.message = Some(empty.title.clone());
            data.detail = match (&empty.description, &empty.action) {
                (Some(description), Some(action)) => {
                    Some(format!("{description} + {} ({})", action.label, action.href))
                }
                (Some(description), None) => Some(description.clone()),
                (None, Some(action)) => Some(format!("+ {} ({})", action.label, action.href)),
                (None, None) => None,
            };
        }
        Body::Table(table) => layout_table(table, &mut data),
        Body::Cards { cards } => {
            data.cards = cards
                .iter()
                .map(|card| CardLine {
                    title: card.title.clone(),
                    status: card
                        .status
                        .as_ref()
                        .map(|cell| cell.text.clone())
                        .unwrap_or_default(),
                    status_style: card.status.as_ref().map(cell_style).unwrap_or(names::CELL),
                    subtitle: card.subtitle.clone(),
                    meta: card
                        .meta
                        .iter()
                        .map(|meta| match &meta.label {
                            Some(label) => format!("{label}: {}", meta.value.text),
                            None => meta.value.text.clone(),
                        })
                        .collect(),
                })
                .collect();
        }
        Body::Custom { content } => data.content = Some(content.clone()),
    }

    if let Some(pager) = &view.pagination {
        data.summary = Some(pager.summary.clone());
        if pager.window.visible {
            data.pager = Some(pager_line(&pager.window));
        }
    }
    data
}

fn pager_line(window: &PageWindow) -> String {
    let previous = if window.has_previous { "‹ prev" } else { "      " };
    let next = if window.has_next { "next ›" } else { "" };
    format!(
        "{previous}  page {} of {}  {next}",
        window.current_page, window.total_pages
    )
    .trim_end()
    .to_string()
}

/// Render a listing page for the terminal.
pub fn render_listing(view: &RenderedListing, use_color: bool) -> Result<String> {
    render_template(LISTING, &listing_data(view), use_color)
}

#[derive(Debug, Serialize)]
struct WindowData<'a> {
    summary: &'a str,
    visible: bool,
    current_page: u32,
    total_pages: u32,
    previous: &'static str,
    previous_style: &'static str,
    next: &'static str,
    next_style: &'static str,
}

/// Render a page window with its summary line.
pub fn render_window(window: &PageWindow, summary: &str, use_color: bool) -> Result<String> {
    let enabled = |on: bool| if on { names::ACTION } else { names::MUTED };
    let data = WindowData {
        summary,
        visible: window.visible,
        current_page: window.current_page,
        total_pages: window.total_pages,
        previous: "‹ prev",
        previous_style: enabled(window.has_previous),
        next: "next ›",
        next_style: enabled(window.has_next),
    };
    render_template(WINDOW, &data, use_color)
}

#[derive(Debug, Serialize)]
struct MessageLine<'a> {
    content: &'a str,
    style: &'static str,
}

#[derive(Debug, Serialize)]
struct MessagesData<'a> {
    messages: Vec<MessageLine<'a>>,
}

/// Render notifications, one per line.
pub fn render_messages(messages: &[Notification], use_color: bool) -> Result<String> {
    let data = MessagesData {
        messages: messages
            .iter()
            .map(|message| MessageLine {
                content: &message.content,
                style: match message.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };
    render_template(MESSAGES, &data, use_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing::config::ListingConfig;
    use listing::pagination::compute_window;
    use listing::settings::Settings;
    use listing::store::memory::InMemorySource;
    use listing::view::{ListingView, MemoryNavigator};
    use serde_json::Value;

    const CONFIG: &str = r#"
        title = "Jobs"
        base_route = "/jobs"
        page_size = 2

        [entity_name]
        singular = "job"
        plural = "jobs"

        [[filters]]
        key = "q"
        label = "Search"
        kind = "search"

        [[columns]]
        key = "title"
        header = "Title"
        sortable = true

        [[columns]]
        key = "account"
        header = "Account"

        [empty_state]
        title = "No jobs found"
        filtered_description = "No jobs match \"{q}\""
    "#;

    const DATA: &str = r#"[
        {"id": "j1", "title": "Welder", "account": "Acme"},
        {"id": "j2", "title": "Forklift Operator", "account": "Globex"},
        {"id": "j3", "title": "Machinist", "account": "Acme"}
    ]"#;

    fn rendered(address: &str) -> RenderedListing {
        let config = ListingConfig::from_toml_str(CONFIG).unwrap();
        let source = InMemorySource::from_json_str(DATA)
            .unwrap()
            .with_filters(&config.filters);
        let mut view: ListingView<Value> =
            ListingView::new(config, Settings::default(), MemoryNavigator::new(address)).unwrap();
        view.bind_source(source).unwrap();
        view.refresh().unwrap();
        view.render(chrono::Utc::now())
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("Forklift Operator", 8), "Forklif…");
        assert_eq!(truncate_to_width("Welder", 8), "Welder");
    }

    #[test]
    fn pads_by_alignment() {
        assert_eq!(pad("42", 5, Align::Right), "   42");
        assert_eq!(pad("42", 5, Align::Left), "42   ");
        assert_eq!(pad("42", 6, Align::Center), "  42  ");
    }

    #[test]
    fn table_lines_up_columns() {
        let output = render_listing(&rendered(""), false).unwrap();
        let header = output
            .lines()
            .find(|line| line.starts_with("Title"))
            .expect("header line");
        let forklift = output
            .lines()
            .find(|line| line.starts_with("Forklift"))
            .expect("forklift row");
        assert_eq!(header.find("Account"), forklift.find("Globex"));
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let output = render_listing(&rendered(""), false).unwrap();
        assert!(!output.contains('\u{1b}'));
        assert!(output.contains("Showing 1–2 of 3 jobs"), "{output}");
        assert!(output.contains("page 1 of 2"), "{output}");
    }

    #[test]
    fn empty_page_shows_filtered_text() {
        let output = render_listing(&rendered("?q=nothing"), false).unwrap();
        assert!(output.contains("No jobs found"), "{output}");
        assert!(output.contains("No jobs match \"nothing\""), "{output}");
    }

    #[test]
    fn window_shows_summary_and_pager() {
        let window = compute_window(45, 20, 2);
        let output = render_window(&window, "Showing 21–40 of 45 items", false).unwrap();
        assert!(output.starts_with("Showing 21–40 of 45 items"));
        assert!(output.contains("Page 2 of 3"));
    }

    #[test]
    fn messages_render_one_per_line() {
        let output = render_messages(
            &[Notification::success("Draft deleted"), Notification::error("Nope")],
            false,
        )
        .unwrap();
        assert_eq!(output, "Draft deleted\nNope\n");
    }
}
