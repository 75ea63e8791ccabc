use crate::address::ParamValue;
use crate::drafts::{DraftRecord, DraftSource};
use crate::error::Result;
use crate::filters::{FilterDescriptor, FilterKind};
use crate::model::{lookup, Entity};
use crate::source::{DataSource, Fetch, FetchError, ListRequest, ListResponse, Stats};
use crate::sort::SortOrder;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

/// A data source over records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    items: Vec<Value>,
    kinds: IndexMap<String, FilterKind>,
    search_fields: Vec<String>,
    status_field: Option<String>,
    failure: Option<FetchError>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    Items(Vec<Value>),
    Wrapped { items: Vec<Value> },
}

impl InMemorySource {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Records from a JSON array, or an object with an `items` array.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let items = match serde_json::from_str(source)? {
            Dataset::Items(items) | Dataset::Wrapped { items } => items,
        };
        Ok(Self::new(items))
    }

    /// Interpret request filters the way the listing declares them. Keys that are
    /// not declared (presets) match by equality.
    pub fn with_filters(mut self, filters: &[FilterDescriptor]) -> Self {
        self.kinds = filters
            .iter()
            .map(|filter| (filter.key.clone(), filter.kind))
            .collect();
        self
    }

    /// Fields a search filter matches against. Without any, every string field is searched.
    pub fn searching<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Report `total` and `byStatus` counts in the response stats.
    pub fn with_status_stats(mut self, field: impl Into<String>) -> Self {
        self.status_field = Some(field.into());
        self
    }

    /// Fail every fetch with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(FetchError::new(message));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn matches(&self, item: &Value, key: &str, value: &ParamValue) -> bool {
        match (self.kinds.get(key), value) {
            (Some(FilterKind::Search), ParamValue::Text(needle)) => self.search(item, needle),
            (_, ParamValue::Flag(flag)) => truthy(item.field(key)) == *flag,
            (_, ParamValue::Text(expected)) => item
                .field(key)
                .is_some_and(|actual| text_of(actual).as_deref() == Some(expected.as_str())),
        }
    }

    fn search(&self, item: &Value, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let haystack: Vec<String> = if self.search_fields.is_empty() {
            match item {
                Value::Object(map) => map.values().filter_map(text_of).collect(),
                _ => Vec::new(),
            }
        } else {
            self.search_fields
                .iter()
                .filter_map(|field| lookup(item, field).and_then(text_of))
                .collect()
        };
        haystack
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    }

    fn stats(&self, matched: &[&Value]) -> Stats {
        let mut stats = Stats::new();
        stats.insert("total".into(), Value::from(matched.len()));
        if let Some(field) = &self.status_field {
            let mut by_status: Map<String, Value> = Map::new();
            for item in matched {
                if let Some(status) = item.field(field).and_then(text_of) {
                    let count = by_status.get(&status).and_then(Value::as_u64).unwrap_or(0);
                    by_status.insert(status, Value::from(count + 1));
                }
            }
            stats.insert("byStatus".into(), Value::Object(by_status));
        }
        stats
    }
}

impl DataSource<Value> for InMemorySource {
    fn fetch(&self, request: &ListRequest) -> Fetch<ListResponse<Value>> {
        if let Some(error) = &self.failure {
            return Fetch::Failed(error.clone());
        }

        let mut matched: Vec<&Value> = self
            .items
            .iter()
            .filter(|item| {
                request
                    .filters
                    .iter()
                    .all(|(key, value)| self.matches(item, key, value))
            })
            .collect();

        if let Some(field) = &request.sort_by {
            matched.sort_by(|a, b| {
                let ordering = compare(a.field(field), b.field(field));
                match request.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let stats = self.stats(&matched);
        let total = matched.len() as u64;
        let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(request.limit as usize)
            .cloned()
            .collect();
        Fetch::Ready(ListResponse::new(items, total).with_stats(stats))
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty() && text != "false",
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

/// Missing values compare lowest, so they trail a descending sort.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|value| !value.is_null());
    let b = b.filter(|value| !value.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => {
            let a = text_of(a).unwrap_or_default().to_lowercase();
            let b = text_of(b).unwrap_or_default().to_lowercase();
            a.cmp(&b)
        }
    }
}

/// A source whose fetches stay pending until the test completes them.
#[derive(Debug, Clone, Default)]
pub struct PendingSource {
    requests: Rc<RefCell<Vec<ListRequest>>>,
}

impl PendingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request issued so far, oldest first.
    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.borrow().clone()
    }
}

impl<E> DataSource<E> for PendingSource {
    fn fetch(&self, request: &ListRequest) -> Fetch<ListResponse<E>> {
        self.requests.borrow_mut().push(request.clone());
        Fetch::Pending
    }
}

/// Drafts held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDrafts {
    drafts: Vec<DraftRecord>,
    fail_lists: bool,
    fail_deletes: bool,
}

impl InMemoryDrafts {
    pub fn new(drafts: Vec<DraftRecord>) -> Self {
        Self {
            drafts,
            ..Self::default()
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(source)?))
    }

    pub fn failing_lists(mut self) -> Self {
        self.fail_lists = true;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }
}

impl DraftSource for InMemoryDrafts {
    fn list_mine(&self) -> Fetch<Vec<DraftRecord>> {
        if self.fail_lists {
            return Fetch::Failed(FetchError::new("drafts are unavailable"));
        }
        Fetch::Ready(self.drafts.clone())
    }

    fn delete(&mut self, id: &str) -> std::result::Result<(), FetchError> {
        if self.fail_deletes {
            return Err(FetchError::new("delete rejected"));
        }
        let before = self.drafts.len();
        self.drafts.retain(|draft| draft.id != id);
        if self.drafts.len() == before {
            return Err(FetchError::new(format!("draft {id} does not exist")));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::config::ListingConfig;
    use serde_json::{json, Value};

    pub const JOBS_CONFIG: &str = r#"
        title = "Jobs"
        description = "Open requisitions across all accounts"
        base_route = "/recruiting/jobs"
        page_size = 2
        status_field = "status"

        [entity_name]
        singular = "job"
        plural = "jobs"

        [[filters]]
        key = "search"
        label = "Search"
        kind = "search"
        placeholder = "Search jobs..."

        [[filters]]
        key = "status"
        label = "Status"
        kind = "select"
        options = [
            { value = "all", label = "All statuses" },
            { value = "open", label = "Open" },
            { value = "filled", label = "Filled" },
        ]

        [[filters]]
        key = "urgent"
        label = "Urgent only"
        kind = "toggle"

        [[columns]]
        key = "title"
        header = "Job Title"
        sortable = true

        [[columns]]
        key = "account.name"
        header = "Account"

        [[columns]]
        key = "status"
        header = "Status"
        format = "status"

        [[columns]]
        key = "rate"
        header = "Bill Rate"
        format = "currency"
        sortable = true
        align = "right"

        [[stat_cards]]
        key = "total"
        label = "Total Jobs"

        [[stat_cards]]
        key = "byStatus.open"
        label = "Open"
        format = "number"

        [status_styles.open]
        label = "Open"
        tone = "info"

        [status_styles.filled]
        label = "Filled"
        tone = "success"

        [empty_state]
        title = "No jobs found"
        description = "Create a job to get started"
        filtered_description = "No jobs match \"{search}\""
    "#;

    pub fn jobs_config() -> ListingConfig {
        ListingConfig::from_toml_str(JOBS_CONFIG).unwrap()
    }

    pub fn jobs() -> Vec<Value> {
        vec![
            json!({"id": "j1", "title": "Welder", "status": "open", "urgent": true,
                   "rate": 42.5, "account": {"name": "Acme"}}),
            json!({"id": "j2", "title": "Forklift Operator", "status": "filled", "urgent": false,
                   "rate": 28, "account": {"name": "Globex"}}),
            json!({"id": "j3", "title": "Machinist", "status": "open", "urgent": false,
                   "rate": 55, "account": {"name": "Acme"}}),
            json!({"id": "j4", "title": "Electrician", "status": "open", "urgent": true,
                   "rate": null, "account": {"name": "Initech"}}),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{jobs, jobs_config};
    use super::*;
    use pretty_assertions::assert_eq;

    fn source() -> InMemorySource {
        InMemorySource::new(jobs())
            .with_filters(&jobs_config().filters)
            .searching(["title", "account.name"])
            .with_status_stats("status")
    }

    fn fetch(source: &InMemorySource, request: &ListRequest) -> ListResponse<Value> {
        match source.fetch(request) {
            Fetch::Ready(response) => response,
            other => panic!("expected a ready fetch, got {other:?}"),
        }
    }

    fn ids(response: &ListResponse<Value>) -> Vec<String> {
        response.items.iter().map(|item| item.id().into_owned()).collect()
    }

    #[test]
    fn pages_through_everything() {
        let mut request = ListRequest::new(3);
        request.offset = 3;
        let response = fetch(&source(), &request);
        assert_eq!(response.total, 4);
        assert_eq!(ids(&response), vec!["j4"]);
    }

    #[test]
    fn search_is_case_insensitive_over_search_fields() {
        let mut request = ListRequest::new(20);
        request.filters.insert("search".into(), ParamValue::text("acme"));
        assert_eq!(ids(&fetch(&source(), &request)), vec!["j1", "j3"]);
    }

    #[test]
    fn select_and_toggle_combine() {
        let mut request = ListRequest::new(20);
        request.filters.insert("status".into(), ParamValue::text("open"));
        request.filters.insert("urgent".into(), ParamValue::Flag(true));
        assert_eq!(ids(&fetch(&source(), &request)), vec!["j1", "j4"]);
    }

    #[test]
    fn sorts_numbers_with_missing_last_when_descending() {
        let mut request = ListRequest::new(20);
        request.sort_by = Some("rate".into());
        request.sort_order = SortOrder::Desc;
        assert_eq!(ids(&fetch(&source(), &request)), vec!["j3", "j1", "j2", "j4"]);
    }

    #[test]
    fn status_stats_count_matches() {
        let response = fetch(&source(), &ListRequest::new(1));
        assert_eq!(response.stats["total"], Value::from(4));
        assert_eq!(response.stats["byStatus"]["open"], Value::from(3));
    }

    #[test]
    fn parses_arrays_and_wrapped_datasets() {
        assert_eq!(InMemorySource::from_json_str(r#"[{"id": 1}]"#).unwrap().len(), 1);
        assert_eq!(
            InMemorySource::from_json_str(r#"{"items": [{"id": 1}, {"id": 2}]}"#)
                .unwrap()
                .len(),
            2
        );
        assert!(InMemorySource::from_json_str("{}").is_err());
    }

    #[test]
    fn pending_source_records_requests() {
        let source = PendingSource::new();
        let shared = source.clone();
        let answer: Fetch<ListResponse<Value>> = source.fetch(&ListRequest::new(5));
        assert_eq!(answer, Fetch::Pending);
        assert_eq!(shared.requests().len(), 1);
    }
}
