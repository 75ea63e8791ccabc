//! # Tabs
//!
//! A listing either renders one panel directly ([`TabMode::NoTabs`]) or a strip of
//! tabs ([`TabMode::Tabbed`]). The active tab lives in the address under `tab`;
//! the first declared tab is the default and is written by dropping the key.
//!
//! Every tab owns an isolated [`Adapter`] and its own data source binding, kept in
//! a map keyed by tab id. Nothing done to one panel touches another: switching
//! tabs does not cancel a sibling's in-flight fetch, a failed fetch stays local to
//! its tab, and a late completion for an inactive tab still lands in that tab.
//!
//! Without tabs there is a single panel under [`ROOT_PANEL`].

use crate::address::{AddressState, Patch, TAB};
use crate::config::{CardConfig, Column, EmptyState};
use crate::error::{ListingError, Result};
use crate::source::{Adapter, Completion, DataSource, Dispatch, FetchError, ListRequest, ListResponse, Ticket};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Panel id used when the listing declares no tabs.
pub const ROOT_PANEL: &str = "";

fn show_filters_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
    #[serde(default)]
    pub card: Option<CardConfig>,
    #[serde(default)]
    pub empty_state: Option<EmptyState>,
    /// Drafts-style tabs hide the filter bar and fetch without filter values.
    #[serde(default = "show_filters_default")]
    pub show_filters: bool,
    /// Name of a panel hook that renders the whole tab body.
    #[serde(default)]
    pub custom_renderer: Option<String>,
}

impl TabDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            columns: None,
            card: None,
            empty_state: None,
            show_filters: true,
            custom_renderer: None,
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_card(mut self, card: CardConfig) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_empty_state(mut self, empty_state: EmptyState) -> Self {
        self.empty_state = Some(empty_state);
        self
    }

    pub fn without_filters(mut self) -> Self {
        self.show_filters = false;
        self
    }

    pub fn rendered_by(mut self, hook: impl Into<String>) -> Self {
        self.custom_renderer = Some(hook.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMode<'a> {
    NoTabs,
    Tabbed { active: &'a str },
}

struct Panel<E> {
    adapter: Adapter<E>,
    source: Option<Box<dyn DataSource<E>>>,
}

impl<E> Panel<E> {
    fn new() -> Self {
        Self {
            adapter: Adapter::new(),
            source: None,
        }
    }
}

/// Owns the active-tab decision and one isolated panel per tab.
pub struct TabController<E> {
    panels: IndexMap<String, Panel<E>>,
    tabbed: bool,
}

impl<E> TabController<E> {
    pub fn new(tabs: &[TabDescriptor]) -> Self {
        let mut panels = IndexMap::new();
        if tabs.is_empty() {
            panels.insert(ROOT_PANEL.to_string(), Panel::new());
        }
        for tab in tabs {
            panels.insert(tab.id.clone(), Panel::new());
        }
        Self {
            panels,
            tabbed: !tabs.is_empty(),
        }
    }

    pub fn is_tabbed(&self) -> bool {
        self.tabbed
    }

    pub fn panel_ids(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    fn default_id(&self) -> &str {
        self.panels.keys().next().map_or(ROOT_PANEL, String::as_str)
    }

    /// Id of the panel to show. A `tab` naming no declared tab means the default.
    pub fn active_id(&self, address: &AddressState) -> &str {
        if !self.tabbed {
            return ROOT_PANEL;
        }
        match address.tab().and_then(|tab| self.panels.get_key_value(tab)) {
            Some((id, _)) => id.as_str(),
            None => self.default_id(),
        }
    }

    pub fn mode(&self, address: &AddressState) -> TabMode<'_> {
        if self.tabbed {
            TabMode::Tabbed {
                active: self.active_id(address),
            }
        } else {
            TabMode::NoTabs
        }
    }

    /// Patch that activates tab `id`; the default tab is written by omission.
    pub fn switch_tab(&self, id: &str) -> Result<Patch> {
        if !self.tabbed || !self.panels.contains_key(id) {
            return Err(ListingError::UnknownTab(id.to_string()));
        }
        if id == self.default_id() {
            Ok(Patch::new().remove(TAB))
        } else {
            Ok(Patch::new().set(TAB, id))
        }
    }

    fn panel(&self, id: &str) -> Result<&Panel<E>> {
        self.panels
            .get(id)
            .ok_or_else(|| ListingError::UnknownTab(id.to_string()))
    }

    fn panel_mut(&mut self, id: &str) -> Result<&mut Panel<E>> {
        self.panels
            .get_mut(id)
            .ok_or_else(|| ListingError::UnknownTab(id.to_string()))
    }

    /// Bind the data source of one panel.
    pub fn bind<S>(&mut self, id: &str, source: S) -> Result<()>
    where
        S: DataSource<E> + 'static,
    {
        self.panel_mut(id)?.source = Some(Box::new(source));
        Ok(())
    }

    pub fn adapter(&self, id: &str) -> Result<&Adapter<E>> {
        Ok(&self.panel(id)?.adapter)
    }

    /// Install pre-fetched data for one panel.
    pub fn seed(&mut self, id: &str, request: ListRequest, response: ListResponse<E>) -> Result<()> {
        self.panel_mut(id)?.adapter.seed(request, response);
        Ok(())
    }

    /// Drive one panel towards `request`.
    pub fn refresh(&mut self, id: &str, request: ListRequest) -> Result<Dispatch> {
        let panel = self.panel_mut(id)?;
        if panel.adapter.is_current(&request) {
            return Ok(Dispatch::Unchanged);
        }
        match &panel.source {
            Some(source) => Ok(panel.adapter.request(source.as_ref(), request)),
            None => Err(ListingError::Config(format!(
                "no data source bound for panel {id:?}"
            ))),
        }
    }

    pub fn retry(&mut self, id: &str) -> Result<Dispatch> {
        let panel = self.panel_mut(id)?;
        match &panel.source {
            Some(source) => Ok(panel.adapter.retry(source.as_ref())),
            None => Ok(Dispatch::Unchanged),
        }
    }

    /// Deliver a deferred fetch result to the panel that issued it.
    pub fn complete(
        &mut self,
        id: &str,
        ticket: &Ticket,
        result: std::result::Result<ListResponse<E>, FetchError>,
    ) -> Result<Completion> {
        Ok(self.panel_mut(id)?.adapter.complete(ticket, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{decode, AddressSchema};
    use crate::source::{Fetch, FetchState};
    use crate::store::memory::PendingSource;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn tabs() -> Vec<TabDescriptor> {
        vec![
            TabDescriptor::new("accounts", "Accounts"),
            TabDescriptor::new("drafts", "Drafts").without_filters(),
        ]
    }

    fn schema() -> AddressSchema {
        AddressSchema::new().with_default_tab("accounts")
    }

    #[test]
    fn first_tab_is_the_default() {
        let controller: TabController<Value> = TabController::new(&tabs());
        let address = decode("", &schema());
        assert_eq!(controller.mode(&address), TabMode::Tabbed { active: "accounts" });

        let address = decode("?tab=drafts", &schema());
        assert_eq!(controller.active_id(&address), "drafts");
    }

    #[test]
    fn unknown_tab_in_address_falls_back() {
        let controller: TabController<Value> = TabController::new(&tabs());
        let address = decode("?tab=archived", &schema());
        assert_eq!(controller.active_id(&address), "accounts");
    }

    #[test]
    fn switching_to_the_default_drops_the_key() {
        let controller: TabController<Value> = TabController::new(&tabs());
        let patch = controller.switch_tab("accounts").unwrap();
        assert_eq!(patch, Patch::new().remove(TAB));
        let patch = controller.switch_tab("drafts").unwrap();
        assert_eq!(patch, Patch::new().set(TAB, "drafts"));
        assert!(matches!(
            controller.switch_tab("nope"),
            Err(ListingError::UnknownTab(_))
        ));
    }

    #[test]
    fn no_tabs_uses_the_root_panel() {
        let controller: TabController<Value> = TabController::new(&[]);
        let address = decode("?tab=drafts", &AddressSchema::new());
        assert_eq!(controller.mode(&address), TabMode::NoTabs);
        assert!(controller.adapter(ROOT_PANEL).is_ok());
        assert!(controller.switch_tab("drafts").is_err());
    }

    #[test]
    fn a_failing_tab_does_not_touch_its_sibling() {
        let mut controller = TabController::new(&tabs());
        controller
            .bind("accounts", |_: &ListRequest| {
                Fetch::Ready(ListResponse::new(vec![json!({"id": 1})], 1))
            })
            .unwrap();
        controller
            .bind("drafts", |_: &ListRequest| {
                Fetch::<ListResponse<Value>>::Failed(FetchError::new("drafts unavailable"))
            })
            .unwrap();

        controller.refresh("accounts", ListRequest::new(20)).unwrap();
        controller.refresh("drafts", ListRequest::new(20)).unwrap();

        assert_eq!(controller.adapter("accounts").unwrap().state().label(), "success");
        assert_eq!(controller.adapter("drafts").unwrap().state().label(), "error");
    }

    #[test]
    fn returning_to_a_failed_tab_fetches_again() {
        let mut controller = TabController::new(&tabs());
        let drafts = PendingSource::new();
        controller
            .bind("accounts", |_: &ListRequest| {
                Fetch::<ListResponse<Value>>::Failed(FetchError::new("accounts unavailable"))
            })
            .unwrap();
        controller.bind("drafts", drafts.clone()).unwrap();

        assert_eq!(controller.refresh("accounts", ListRequest::new(20)).unwrap(), Dispatch::Resolved);
        controller.refresh("drafts", ListRequest::new(20)).unwrap();
        assert_eq!(controller.refresh("accounts", ListRequest::new(20)).unwrap(), Dispatch::Resolved);
        assert_eq!(controller.adapter("accounts").unwrap().state().label(), "error");

        assert_eq!(controller.refresh("drafts", ListRequest::new(20)).unwrap(), Dispatch::Unchanged);
        assert_eq!(drafts.requests().len(), 1);
    }

    #[test]
    fn late_completion_lands_in_its_own_tab() {
        let mut controller: TabController<Value> = TabController::new(&tabs());
        controller.bind("accounts", PendingSource::new()).unwrap();
        controller.bind("drafts", PendingSource::new()).unwrap();

        let Dispatch::Pending(ticket) = controller.refresh("accounts", ListRequest::new(20)).unwrap() else {
            panic!("expected a pending fetch");
        };
        controller.refresh("drafts", ListRequest::new(20)).unwrap();

        let completion = controller
            .complete("accounts", &ticket, Ok(ListResponse::new(Vec::new(), 0)))
            .unwrap();
        assert_eq!(completion, Completion::Applied);
        assert_eq!(controller.adapter("accounts").unwrap().state().label(), "success");
        assert_eq!(controller.adapter("drafts").unwrap().state(), &FetchState::Loading);
    }

    #[test]
    fn unbound_panel_is_a_config_error() {
        let mut controller: TabController<Value> = TabController::new(&tabs());
        assert!(matches!(
            controller.refresh("accounts", ListRequest::new(20)),
            Err(ListingError::Config(_))
        ));
    }
}
