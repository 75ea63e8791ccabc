//! # Listing View
//!
//! [`ListingView`] wires the pieces together for one page view. It owns the
//! configuration, the decoded address, the tab controller with its per-panel
//! adapters, the optional draft registry, and a [`Navigator`].
//!
//! ## The Cycle
//!
//! 1. [`ListingView::sync`] decodes an address, resolves filters, builds the fetch
//!    request of the active panel and drives that panel's adapter. An unchanged
//!    request is not re-fetched.
//! 2. [`ListingView::render`] produces a [`RenderedListing`] from whatever the
//!    adapters currently hold.
//! 3. [`ListingView::dispatch`] turns a user [`Action`] into an address patch,
//!    encodes the new address, hands it to the navigator and re-syncs.
//!
//! The address is the only source of truth besides host presets. Nothing the
//! user does is stored anywhere else, so any rendered state can be reproduced by
//! constructing a view over the same address.

use crate::address::{decode, encode, AddressSchema, AddressState, ParamValue, Patch};
use crate::config::{EmptyState, Layout, ListingConfig};
use crate::drafts::{DraftRegistry, DraftSource};
use crate::error::{ListingError, Result};
use crate::filters::{clear_filters, resolve_values, set_filter, FilterValues, Presets};
use crate::format::FormatContext;
use crate::model::Entity;
use crate::pagination::{compute_window, offset, page_patch, PageWindow};
use crate::render::{self, Body, Hooks, PagerView, RenderedListing, TabView};
use crate::settings::Settings;
use crate::sort::SortState;
use crate::source::{Completion, DataSource, Dispatch, FetchError, FetchState, ListRequest, ListResponse, Ticket};
use crate::tabs::{TabController, TabDescriptor, ROOT_PANEL};
use chrono::{DateTime, Utc};

/// Applies a new address to the host's navigation layer.
pub trait Navigator {
    /// The address currently shown.
    fn current(&self) -> String;

    /// Replace the current address without adding a history entry.
    fn replace(&mut self, address: &str);
}

/// A navigator that only remembers what it was told.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: vec![initial.into()],
        }
    }

    /// Every address held so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn replace(&mut self, address: &str) {
        self.history.push(address.to_string());
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetFilter { key: String, value: ParamValue },
    ClearFilters,
    ToggleSort(String),
    GoToPage(u32),
    NextPage,
    PreviousPage,
    SwitchTab(String),
    Retry,
}

pub struct ListingView<E, N = MemoryNavigator> {
    config: ListingConfig,
    settings: Settings,
    schema: AddressSchema,
    presets: Presets,
    hooks: Hooks<E>,
    tabs: TabController<E>,
    drafts: Option<DraftRegistry>,
    navigator: N,
    address: AddressState,
}

impl<E: Entity, N: Navigator> ListingView<E, N> {
    pub fn new(config: ListingConfig, settings: Settings, navigator: N) -> Result<Self> {
        config.validate()?;
        let schema = config.address_schema();
        let address = decode(&navigator.current(), &schema);
        Ok(Self {
            tabs: TabController::new(&config.tabs),
            config,
            settings,
            schema,
            presets: Presets::new(),
            hooks: Hooks::new(),
            drafts: None,
            navigator,
            address,
        })
    }

    pub fn with_presets(mut self, presets: Presets) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks<E>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Bind the data source of an untabbed listing, or of its first tab.
    pub fn bind_source<S>(&mut self, source: S) -> Result<()>
    where
        S: DataSource<E> + 'static,
    {
        let id = self
            .config
            .tabs
            .first()
            .map_or(ROOT_PANEL, |tab| tab.id.as_str())
            .to_string();
        self.tabs.bind(&id, source)
    }

    pub fn bind_tab_source<S>(&mut self, tab: &str, source: S) -> Result<()>
    where
        S: DataSource<E> + 'static,
    {
        self.tabs.bind(tab, source)
    }

    /// Install pre-fetched data as the answer for the current address.
    pub fn seed(&mut self, response: ListResponse<E>) -> Result<()> {
        let request = self.current_request();
        let id = self.active_tab().to_string();
        self.tabs.seed(&id, request, response)
    }

    /// Enable the drafts section, using the listing's draft configuration.
    pub fn attach_drafts<S>(&mut self, source: S) -> Result<()>
    where
        S: DraftSource + 'static,
    {
        let config = self
            .config
            .drafts
            .clone()
            .ok_or_else(|| ListingError::Config("listing declares no drafts".into()))?;
        let mut registry = DraftRegistry::new(config, source);
        registry.refresh();
        self.drafts = Some(registry);
        Ok(())
    }

    pub fn drafts(&self) -> Option<&DraftRegistry> {
        self.drafts.as_ref()
    }

    pub fn drafts_mut(&mut self) -> Option<&mut DraftRegistry> {
        self.drafts.as_mut()
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn schema(&self) -> &AddressSchema {
        &self.schema
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn address(&self) -> &AddressState {
        &self.address
    }

    pub fn active_tab(&self) -> &str {
        self.tabs.active_id(&self.address)
    }

    fn active_descriptor(&self) -> Option<&TabDescriptor> {
        self.config.tab(self.active_tab())
    }

    fn shows_filters(&self) -> bool {
        self.active_descriptor().map_or(true, |tab| tab.show_filters)
    }

    pub fn filter_values(&self) -> FilterValues {
        resolve_values(&self.config.filters, &self.address, &self.presets)
    }

    pub fn sort(&self) -> SortState {
        SortState::from_address(&self.address)
    }

    pub fn page_size(&self) -> u32 {
        self.settings.page_size(self.config.page_size)
    }

    /// The fetch request for the active panel under the current address.
    pub fn current_request(&self) -> ListRequest {
        let page_size = self.page_size();
        let sort = self.sort();
        let mut request = ListRequest::new(page_size);
        if self.shows_filters() {
            request.filters = self.filter_values().to_request();
        }
        request.offset = offset(self.address.page(), page_size);
        request.sort_by = self.config.sort_field(sort.by.as_deref());
        request.sort_order = sort.order;
        request
    }

    /// Adopt `address` and bring the active panel up to date with it.
    pub fn sync(&mut self, address: &str) -> Result<Dispatch> {
        self.address = decode(address, &self.schema);
        self.refresh()
    }

    /// Bring the active panel up to date with the current address.
    pub fn refresh(&mut self) -> Result<Dispatch> {
        let request = self.current_request();
        let id = self.active_tab().to_string();
        self.tabs.refresh(&id, request)
    }

    /// Apply a user action: patch the address, navigate, re-sync.
    pub fn dispatch(&mut self, action: Action) -> Result<Dispatch> {
        let patch = match action {
            Action::Retry => {
                let id = self.active_tab().to_string();
                return self.tabs.retry(&id);
            }
            Action::SetFilter { key, value } => set_filter(&self.config.filters, &key, value)?,
            Action::ClearFilters => clear_filters(&self.config.filters),
            Action::ToggleSort(column) => self.sort_patch(&column)?,
            Action::SwitchTab(id) => self.tabs.switch_tab(&id)?,
            Action::GoToPage(0) => {
                return Err(ListingError::InvalidArgument("pages start at 1".into()));
            }
            // Without a loaded window the page count is unknown; the fetch settles it.
            Action::GoToPage(page) => match self.page_window() {
                Some(window) => window.jump_to(page).ok_or_else(|| {
                    ListingError::InvalidArgument(format!(
                        "page {page} is out of range ({} pages)",
                        window.total_pages
                    ))
                })?,
                None => page_patch(page),
            },
            Action::NextPage => match self.page_window().and_then(|window| window.next_page()) {
                Some(patch) => patch,
                None => return Ok(Dispatch::Unchanged),
            },
            Action::PreviousPage => match self.page_window().and_then(|window| window.previous_page()) {
                Some(patch) => patch,
                None => return Ok(Dispatch::Unchanged),
            },
        };
        self.navigate(&patch)
    }

    fn sort_patch(&self, column: &str) -> Result<Patch> {
        if !self.config.is_sortable(self.active_descriptor(), column) {
            return Err(ListingError::NotSortable(column.to_string()));
        }
        Ok(self.sort().toggled(column).patch())
    }

    fn navigate(&mut self, patch: &Patch) -> Result<Dispatch> {
        let next = encode(&self.address, patch, &self.schema);
        tracing::debug!(from = %self.address, to = %next, "address replaced");
        self.navigator.replace(&next);
        self.sync(&next)
    }

    /// Deliver a deferred fetch result to the panel that issued it.
    pub fn complete(
        &mut self,
        tab: &str,
        ticket: &Ticket,
        result: std::result::Result<ListResponse<E>, FetchError>,
    ) -> Result<Completion> {
        self.tabs.complete(tab, ticket, result)
    }

    /// The page window of the active panel, once it has data.
    pub fn page_window(&self) -> Option<PageWindow> {
        let adapter = self.tabs.adapter(self.active_tab()).ok()?;
        let response = adapter.response()?;
        Some(compute_window(response.total, self.page_size(), self.address.page()))
    }

    /// Build the view model for the current state.
    pub fn render(&self, now: DateTime<Utc>) -> RenderedListing {
        let ctx = FormatContext {
            now,
            settings: &self.settings,
            status_styles: &self.config.status_styles,
        };
        let active = self.active_tab();
        let tab = self.active_descriptor();
        let values = self.filter_values();
        let adapter = self.tabs.adapter(active).ok();

        let body = match adapter.map(|adapter| adapter.state()) {
            None | Some(FetchState::Idle) | Some(FetchState::Loading) => Body::Loading,
            Some(FetchState::Error(error)) => Body::Errored {
                message: error.message.clone(),
            },
            Some(FetchState::Success(response)) if response.items.is_empty() => {
                let fallback = EmptyState::default();
                let empty_state = tab
                    .and_then(|tab| tab.empty_state.as_ref())
                    .or(self.config.empty_state.as_ref())
                    .unwrap_or(&fallback);
                Body::Empty(render::empty(empty_state, &self.config.filters, &values))
            }
            Some(FetchState::Success(response)) => match self.config.layout_for(tab) {
                Some(Layout::Table(columns)) => Body::Table(render::table(
                    &response.items,
                    columns,
                    &self.sort(),
                    &self.hooks,
                    &ctx,
                )),
                Some(Layout::Cards(card)) => Body::Cards {
                    cards: render::cards(
                        &response.items,
                        card,
                        self.config.status_field.as_deref(),
                        &self.hooks,
                        &ctx,
                    ),
                },
                Some(Layout::Custom(name)) => render::custom(&response.items, name, &self.hooks),
                None => Body::Errored {
                    message: "No layout configured".to_string(),
                },
            },
        };

        let pagination = self.page_window().map(|window| PagerView {
            summary: window.summary(&self.config.entity_name),
            window,
        });

        let tabs = self
            .config
            .tabs
            .iter()
            .map(|descriptor| {
                let adapter = self.tabs.adapter(&descriptor.id).ok();
                TabView {
                    id: descriptor.id.clone(),
                    label: descriptor.label.clone(),
                    active: descriptor.id == active,
                    state: adapter.map_or("idle", |adapter| adapter.state().label()),
                    count: adapter
                        .and_then(|adapter| adapter.last_response())
                        .map(|response| response.total),
                }
            })
            .collect();

        let stats = adapter
            .and_then(|adapter| adapter.last_response())
            .map(|response| &response.stats);

        RenderedListing {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            entity_name: self.config.entity_name.clone(),
            primary_action: self.config.primary_action.clone(),
            address: self.address.to_query(),
            stat_cards: render::stat_cards(&self.config.stat_cards, stats, &ctx),
            filters: self
                .shows_filters()
                .then(|| render::filter_bar(&self.config.filters, &values)),
            tabs,
            drafts: self.drafts.as_ref().and_then(|drafts| drafts.rows(now)),
            body,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::PAGE;
    use crate::config::Column;
    use crate::drafts::{DraftConfig, DraftRecord};
    use crate::source::Fetch;
    use crate::store::memory::fixtures::{jobs, jobs_config};
    use crate::store::memory::{InMemoryDrafts, InMemorySource, PendingSource};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn jobs_view(address: &str) -> ListingView<Value> {
        let config = jobs_config();
        let source = InMemorySource::new(jobs())
            .with_filters(&config.filters)
            .searching(["title", "account.name"])
            .with_status_stats("status");
        let mut view =
            ListingView::new(config, Settings::default(), MemoryNavigator::new(address)).unwrap();
        view.bind_source(source).unwrap();
        view.refresh().unwrap();
        view
    }

    fn rendered_ids(view: &ListingView<Value>) -> Vec<String> {
        match view.render(now()).body {
            Body::Table(table) => table.rows.into_iter().map(|row| row.id).collect(),
            other => panic!("expected a table, got {}", other.label()),
        }
    }

    #[test]
    fn first_page_of_everything() {
        let view = jobs_view("/recruiting/jobs");
        let rendered = view.render(now());
        assert_eq!(rendered.address, "");
        assert_eq!(rendered_ids(&view), vec!["j1", "j2"]);

        let pager = rendered.pagination.unwrap();
        assert_eq!(pager.window.total_pages, 2);
        assert_eq!(pager.summary, "Showing 1–2 of 4 jobs");
        assert_eq!(rendered.stat_cards[0].value.text, "4");
        assert_eq!(rendered.stat_cards[1].value.text, "3");
    }

    #[test]
    fn filter_changes_write_the_address_and_reset_the_page() {
        let mut view = jobs_view("?page=2");
        assert_eq!(rendered_ids(&view), vec!["j3", "j4"]);

        view.dispatch(Action::SetFilter {
            key: "status".into(),
            value: "open".into(),
        })
        .unwrap();
        assert_eq!(view.navigator().current(), "?status=open");
        assert_eq!(rendered_ids(&view), vec!["j1", "j3"]);

        view.dispatch(Action::SetFilter {
            key: "search".into(),
            value: "acme".into(),
        })
        .unwrap();
        assert_eq!(view.navigator().current(), "?status=open&search=acme");

        view.dispatch(Action::SetFilter {
            key: "status".into(),
            value: "all".into(),
        })
        .unwrap();
        assert_eq!(view.navigator().current(), "?search=acme");

        view.dispatch(Action::ClearFilters).unwrap();
        assert_eq!(view.navigator().current(), "");
    }

    #[test]
    fn paging_moves_and_disables_at_the_ends() {
        let mut view = jobs_view("");
        assert_eq!(view.dispatch(Action::PreviousPage).unwrap(), Dispatch::Unchanged);

        view.dispatch(Action::NextPage).unwrap();
        assert_eq!(view.navigator().current(), "?page=2");
        assert_eq!(view.dispatch(Action::NextPage).unwrap(), Dispatch::Unchanged);

        view.dispatch(Action::GoToPage(1)).unwrap();
        assert_eq!(view.navigator().current(), "");
        assert!(matches!(
            view.dispatch(Action::GoToPage(9)),
            Err(ListingError::InvalidArgument(message)) if message == "page 9 is out of range (2 pages)"
        ));
    }

    #[test]
    fn jumping_pages_before_the_first_load_navigates() {
        let config = jobs_config();
        let source = PendingSource::new();
        let mut view =
            ListingView::<Value>::new(config, Settings::default(), MemoryNavigator::new("")).unwrap();
        view.bind_source(source.clone()).unwrap();
        view.refresh().unwrap();
        assert!(view.page_window().is_none());

        assert!(matches!(view.dispatch(Action::GoToPage(3)).unwrap(), Dispatch::Pending(_)));
        assert_eq!(view.navigator().current(), "?page=3");
        assert_eq!(source.requests().len(), 2);
        assert!(matches!(
            view.dispatch(Action::GoToPage(0)),
            Err(ListingError::InvalidArgument(message)) if message == "pages start at 1"
        ));
    }

    #[test]
    fn out_of_range_page_renders_empty_without_redirect() {
        let view = jobs_view("?page=7");
        let rendered = view.render(now());
        assert_eq!(rendered.address, "?page=7");
        assert_eq!(rendered.body.label(), "empty");
        let window = rendered.pagination.unwrap().window;
        assert_eq!((window.showing_from, window.showing_to), (0, 0));
        assert!(!window.has_previous && !window.has_next);
        assert_eq!(view.navigator().history().len(), 1);
    }

    #[test]
    fn sort_cycles_and_rejects_unsortable_columns() {
        let mut view = jobs_view("?page=2");
        view.dispatch(Action::ToggleSort("rate".into())).unwrap();
        assert_eq!(view.navigator().current(), "?sortBy=rate");
        assert_eq!(rendered_ids(&view), vec!["j3", "j1"]);

        view.dispatch(Action::ToggleSort("rate".into())).unwrap();
        assert_eq!(view.navigator().current(), "?sortBy=rate&sortOrder=asc");

        view.dispatch(Action::ToggleSort("title".into())).unwrap();
        assert_eq!(view.navigator().current(), "?sortBy=title");

        assert!(matches!(
            view.dispatch(Action::ToggleSort("status".into())),
            Err(ListingError::NotSortable(_))
        ));
    }

    #[test]
    fn presets_apply_until_the_address_overrides_them() {
        let mut presets = Presets::new();
        presets.insert("status".into(), "filled".into());
        let config = jobs_config();
        let source = PendingSource::new();
        let mut view = ListingView::<Value>::new(config, Settings::default(), MemoryNavigator::new(""))
            .unwrap()
            .with_presets(presets);
        view.bind_source(source.clone()).unwrap();

        view.refresh().unwrap();
        view.sync("?status=open").unwrap();

        let requests = source.requests();
        assert_eq!(requests[0].filters["status"], ParamValue::text("filled"));
        assert_eq!(requests[1].filters["status"], ParamValue::text("open"));
        assert_eq!(view.navigator().history(), [""]);
    }

    #[test]
    fn rapid_changes_only_apply_the_latest_response() {
        let config = jobs_config();
        let source = PendingSource::new();
        let mut view =
            ListingView::<Value>::new(config, Settings::default(), MemoryNavigator::new("")).unwrap();
        view.bind_source(source).unwrap();

        let Dispatch::Pending(first) = view.sync("?search=ac").unwrap() else {
            panic!("expected a pending fetch");
        };
        let Dispatch::Pending(second) = view.sync("?search=acme").unwrap() else {
            panic!("expected a pending fetch");
        };
        assert_eq!(view.render(now()).body, Body::Loading);

        let newer = ListResponse::new(vec![json!({"id": "j1", "title": "Welder"})], 1);
        let older = ListResponse::new(vec![json!({"id": "j1"}), json!({"id": "j3"})], 2);
        assert_eq!(view.complete(ROOT_PANEL, &second, Ok(newer)).unwrap(), Completion::Applied);
        assert_eq!(view.complete(ROOT_PANEL, &first, Ok(older)).unwrap(), Completion::Stale);

        assert_eq!(rendered_ids(&view), vec!["j1"]);
    }

    #[test]
    fn seeded_data_avoids_the_first_fetch() {
        let config = jobs_config();
        let source = PendingSource::new();
        let mut view =
            ListingView::<Value>::new(config, Settings::default(), MemoryNavigator::new("")).unwrap();
        view.bind_source(source.clone()).unwrap();
        view.seed(ListResponse::new(jobs(), 4)).unwrap();

        assert_eq!(view.refresh().unwrap(), Dispatch::Unchanged);
        assert!(source.requests().is_empty());
    }

    #[test]
    fn failures_render_inline_and_retry() {
        let config = jobs_config();
        let mut view =
            ListingView::<Value>::new(config, Settings::default(), MemoryNavigator::new("")).unwrap();
        view.bind_source(InMemorySource::new(jobs()).failing("backend down")).unwrap();
        view.refresh().unwrap();

        let rendered = view.render(now());
        assert_eq!(
            rendered.body,
            Body::Errored {
                message: "backend down".into()
            }
        );
        assert!(rendered.filters.is_some());
        assert!(rendered.pagination.is_none());
        assert_eq!(view.dispatch(Action::Retry).unwrap(), Dispatch::Resolved);
    }

    fn tabbed_config() -> ListingConfig {
        let mut config = jobs_config();
        config.drafts = Some(DraftConfig::new("/recruiting/jobs/intake"));
        config.tabs = vec![
            TabDescriptor::new("jobs", "Jobs"),
            TabDescriptor::new("archived", "Archived")
                .with_columns(vec![Column::new("title", "Title")])
                .without_filters(),
        ];
        config
    }

    #[test]
    fn tabs_fetch_independently() {
        let mut view =
            ListingView::<Value>::new(tabbed_config(), Settings::default(), MemoryNavigator::new("?status=open"))
                .unwrap();
        let archived = PendingSource::new();
        let filters = jobs_config().filters;
        view.bind_source(InMemorySource::new(jobs()).with_filters(&filters))
            .unwrap();
        view.bind_tab_source("archived", archived.clone()).unwrap();
        view.refresh().unwrap();

        view.dispatch(Action::SwitchTab("archived".into())).unwrap();
        assert_eq!(view.navigator().current(), "?status=open&tab=archived");

        let rendered = view.render(now());
        assert!(rendered.filters.is_none());
        assert_eq!(rendered.body, Body::Loading);
        assert_eq!(rendered.tabs[0].state, "success");
        assert_eq!(rendered.tabs[0].count, Some(3));
        assert_eq!(rendered.tabs[1].state, "loading");
        assert!(archived.requests()[0].filters.is_empty());

        view.dispatch(Action::SwitchTab("jobs".into())).unwrap();
        assert_eq!(view.navigator().current(), "?status=open");
        assert_eq!(view.render(now()).tabs[1].state, "loading");
        assert_eq!(view.render(now()).body.label(), "table");

        assert!(matches!(
            view.dispatch(Action::SwitchTab("nope".into())),
            Err(ListingError::UnknownTab(_))
        ));
    }

    #[test]
    fn drafts_render_above_the_listing() {
        let mut view =
            ListingView::<Value>::new(tabbed_config(), Settings::default(), MemoryNavigator::new(""))
                .unwrap();
        view.bind_source(InMemorySource::new(jobs())).unwrap();
        view.refresh().unwrap();
        assert!(view.render(now()).drafts.is_none());

        let draft = DraftRecord::new("d1", now()).with_progress(3, 5);
        view.attach_drafts(InMemoryDrafts::new(vec![draft])).unwrap();

        let rows = view.render(now()).drafts.unwrap();
        assert_eq!(rows[0].progress, 60);
        assert_eq!(rows[0].resume_route, "/recruiting/jobs/intake?draft=d1");
    }

    #[test]
    fn empty_draft_list_renders_nothing() {
        let mut view =
            ListingView::<Value>::new(tabbed_config(), Settings::default(), MemoryNavigator::new(""))
                .unwrap();
        view.attach_drafts(InMemoryDrafts::new(Vec::new())).unwrap();
        assert!(view.render(now()).drafts.is_none());
    }

    #[test]
    fn page_is_kept_only_for_page_moves() {
        let mut view = jobs_view("");
        view.dispatch(Action::NextPage).unwrap();
        assert!(view.address().contains(PAGE));
        view.dispatch(Action::SetFilter {
            key: "urgent".into(),
            value: true.into(),
        })
        .unwrap();
        assert!(!view.address().contains(PAGE));
        assert_eq!(view.navigator().current(), "?urgent=true");
    }

    #[test]
    fn closures_bind_as_sources() {
        let config = jobs_config();
        let mut view =
            ListingView::<Value>::new(config, Settings::default(), MemoryNavigator::new("")).unwrap();
        view.bind_source(|request: &ListRequest| {
            Fetch::Ready(ListResponse::new(vec![json!({"id": request.limit})], 1))
        })
        .unwrap();
        view.refresh().unwrap();
        assert_eq!(rendered_ids(&view), vec!["2"]);
    }
}
