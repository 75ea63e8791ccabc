//! # Command Handlers
//!
//! Each handler loads what it needs from disk, drives the library, and prints.
//! Errors bubble up to `main`, which prints them and exits non-zero.

use super::render::{render_listing, render_messages, render_window};
use super::setup::{Cli, Commands, PatchAction};
use chrono::{DateTime, Utc};
use clap::Parser;
use console::Term;
use listing::address::{decode, encode, ParamValue};
use listing::config::ListingConfig;
use listing::error::{ListingError, Result};
use listing::filters::{clear_filters, set_filter};
use listing::pagination::{compute_window, page_patch};
use listing::render::PagerView;
use listing::settings::Settings;
use listing::sort::SortState;
use listing::store::memory::{InMemoryDrafts, InMemorySource};
use listing::tabs::TabController;
use listing::view::{ListingView, MemoryNavigator};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.settings.as_deref())?;
    let use_color = settings.color && Term::stdout().features().colors_supported();

    match cli.command {
        Commands::Render {
            config,
            data,
            tab_data,
            drafts,
            delete_draft,
            search_fields,
            address,
            json,
            no_color,
            now,
        } => handle_render(RenderArgs {
            settings,
            config: &config,
            data: &data,
            tab_data: &tab_data,
            drafts: drafts.as_deref(),
            delete_draft: delete_draft.as_deref(),
            search_fields: &search_fields,
            address,
            json,
            use_color: use_color && !no_color,
            now: now.unwrap_or_else(Utc::now),
        }),
        Commands::Patch {
            config,
            address,
            action,
        } => handle_patch(&config, &address, &action),
        Commands::Window {
            total,
            page_size,
            page,
            json,
        } => handle_window(&settings, total, page_size, page, json, use_color),
    }
}

/// Logs go to stderr so they never mix with rendered output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("listing=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

struct RenderArgs<'a> {
    settings: Settings,
    config: &'a Path,
    data: &'a Path,
    tab_data: &'a [(String, PathBuf)],
    drafts: Option<&'a Path>,
    delete_draft: Option<&'a str>,
    search_fields: &'a [String],
    address: String,
    json: bool,
    use_color: bool,
    now: DateTime<Utc>,
}

fn load_source(path: &Path, config: &ListingConfig, search_fields: &[String]) -> Result<InMemorySource> {
    let raw = std::fs::read_to_string(path)?;
    let mut source = InMemorySource::from_json_str(&raw)?.with_filters(&config.filters);
    if !search_fields.is_empty() {
        source = source.searching(search_fields);
    }
    if let Some(field) = &config.status_field {
        source = source.with_status_stats(field.as_str());
    }
    tracing::debug!(path = %path.display(), records = source.len(), "dataset loaded");
    Ok(source)
}

fn handle_render(args: RenderArgs<'_>) -> Result<()> {
    let config = ListingConfig::load(args.config)?;
    let primary = load_source(args.data, &config, args.search_fields)?;
    let tab_sources = args
        .tab_data
        .iter()
        .map(|(tab, path)| Ok((tab.clone(), load_source(path, &config, args.search_fields)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut view: ListingView<Value> =
        ListingView::new(config, args.settings, MemoryNavigator::new(args.address))?;
    view.bind_source(primary)?;
    for (tab, source) in tab_sources {
        view.bind_tab_source(&tab, source)?;
    }

    if let Some(path) = args.drafts {
        let raw = std::fs::read_to_string(path)?;
        view.attach_drafts(InMemoryDrafts::from_json_str(&raw)?)?;
    }
    if let (Some(id), Some(registry)) = (args.delete_draft, view.drafts_mut()) {
        registry.request_delete(id)?;
        registry.confirm_delete()?;
    }

    view.refresh()?;
    let rendered = view.render(args.now);
    let notifications = view
        .drafts_mut()
        .map(|registry| registry.take_notifications())
        .unwrap_or_default();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        print!("{}", render_listing(&rendered, args.use_color)?);
    }
    if !notifications.is_empty() {
        eprint!("{}", render_messages(&notifications, args.use_color)?);
    }
    Ok(())
}

fn handle_patch(config: &Path, address: &str, action: &PatchAction) -> Result<()> {
    let config = ListingConfig::load(config)?;
    let schema = config.address_schema();
    let state = decode(address, &schema);
    let tabs = TabController::<Value>::new(&config.tabs);

    let patch = if let Some((key, value)) = &action.set {
        set_filter(&config.filters, key, ParamValue::text(value.as_str()))?
    } else if let Some(column) = &action.sort {
        let tab = config.tab(tabs.active_id(&state));
        if !config.is_sortable(tab, column) {
            return Err(ListingError::NotSortable(column.clone()));
        }
        SortState::from_address(&state).toggled(column).patch()
    } else if let Some(page) = action.page {
        if page == 0 {
            return Err(ListingError::InvalidArgument("pages start at 1".into()));
        }
        page_patch(page)
    } else if action.next {
        page_patch(state.page() + 1)
    } else if action.prev {
        page_patch(state.page().saturating_sub(1))
    } else if let Some(tab) = &action.tab {
        tabs.switch_tab(tab)?
    } else if action.clear {
        clear_filters(&config.filters)
    } else {
        return Err(ListingError::InvalidArgument("no action given".into()));
    };

    println!("{}", encode(&state, &patch, &schema));
    Ok(())
}

fn handle_window(
    settings: &Settings,
    total: u64,
    page_size: Option<u32>,
    page: u32,
    json: bool,
    use_color: bool,
) -> Result<()> {
    let window = compute_window(total, settings.page_size(page_size), page);
    let summary = window.summary(&Default::default());
    if json {
        let pager = PagerView { window, summary };
        println!("{}", serde_json::to_string_pretty(&pager)?);
    } else {
        print!("{}", render_window(&window, &summary, use_color)?);
    }
    Ok(())
}
