//! # Data Sources
//!
//! A [`DataSource`] turns a [`ListRequest`] into items, a total and optional
//! stats. The remote data layer is out of scope; this module only defines the
//! binding and the state machine around it.
//!
//! ## Synchronous and Deferred Fetches
//!
//! A source answers a fetch with [`Fetch::Ready`] or [`Fetch::Failed`] when it
//! has the answer at hand (pre-fetched data, in-memory collections), or with
//! [`Fetch::Pending`] when the answer arrives later. Pending fetches are completed
//! by the host through [`Adapter::complete`] with the [`Ticket`] handed out when
//! the fetch was issued.
//!
//! ## Staleness
//!
//! Every issued fetch is tagged with the [`Signature`] of the request that
//! produced it. A completion is applied only if its signature still matches the
//! adapter's current request; anything else is discarded. Rapid filter changes
//! therefore can never paint an older result over a newer one, regardless of the
//! order in which responses arrive.
//!
//! A request identical to the current one is not re-issued.

use crate::address::ParamValue;
use crate::model::lookup_in;
use crate::sort::SortOrder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Parameters handed to a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRequest {
    pub filters: BTreeMap<String, ParamValue>,
    pub limit: u32,
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl ListRequest {
    pub fn new(limit: u32) -> Self {
        Self {
            filters: BTreeMap::new(),
            limit,
            offset: 0,
            sort_by: None,
            sort_order: SortOrder::Desc,
        }
    }

    /// Canonical identity of this request. Filters are key-ordered, so two
    /// requests with the same parameters always share a signature.
    pub fn signature(&self) -> Signature {
        Signature(serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type Stats = Map<String, Value>;

/// Resolve a dotted stat key such as `byStatus.active`.
pub fn stat<'a>(stats: &'a Stats, key: &str) -> Option<&'a Value> {
    lookup_in(stats, key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<E> {
    pub items: Vec<E>,
    pub total: u64,
    #[serde(default)]
    pub stats: Stats,
}

impl<E> ListResponse<E> {
    pub fn new(items: Vec<E>, total: u64) -> Self {
        Self {
            items,
            total,
            stats: Stats::new(),
        }
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }
}

/// A failed fetch. Carried in state and shown inline; never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a source answers when asked to fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Ready(T),
    Failed(FetchError),
    Pending,
}

impl<T> From<Result<T, FetchError>> for Fetch<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Fetch::Ready(value),
            Err(error) => Fetch::Failed(error),
        }
    }
}

/// Binding to whatever actually loads the records.
///
/// Implementations must be side-effect free and idempotent: the same request
/// yields the same answer, modulo changes in the underlying data.
pub trait DataSource<E> {
    fn fetch(&self, request: &ListRequest) -> Fetch<ListResponse<E>>;
}

impl<E, F> DataSource<E> for F
where
    F: Fn(&ListRequest) -> Fetch<ListResponse<E>>,
{
    fn fetch(&self, request: &ListRequest) -> Fetch<ListResponse<E>> {
        self(request)
    }
}

/// Handle for a fetch that completes later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub signature: Signature,
}

/// The visible state of one adapter. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<E> {
    Idle,
    Loading,
    Success(ListResponse<E>),
    Error(FetchError),
}

impl<E> FetchState<E> {
    pub fn label(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Error(_) => "error",
        }
    }
}

/// Outcome of [`Adapter::request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Same request as the current one; nothing issued.
    Unchanged,
    /// Issued and answered synchronously.
    Resolved,
    /// Issued; complete it with this ticket.
    Pending(Ticket),
}

/// Outcome of [`Adapter::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Fetch state for one panel (a whole listing, or one tab).
#[derive(Debug)]
pub struct Adapter<E> {
    state: FetchState<E>,
    previous: Option<ListResponse<E>>,
    current: Option<(ListRequest, Signature)>,
    in_flight: Option<Ticket>,
    next_seq: u64,
}

impl<E> Default for Adapter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Adapter<E> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            previous: None,
            current: None,
            in_flight: None,
            next_seq: 1,
        }
    }

    pub fn state(&self) -> &FetchState<E> {
        &self.state
    }

    pub fn response(&self) -> Option<&ListResponse<E>> {
        match &self.state {
            FetchState::Success(response) => Some(response),
            _ => None,
        }
    }

    /// The newest successful response, kept visible while a refetch loads.
    pub fn last_response(&self) -> Option<&ListResponse<E>> {
        self.response().or(self.previous.as_ref())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn request_in_use(&self) -> Option<&ListRequest> {
        self.current.as_ref().map(|(request, _)| request)
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.current.as_ref().map(|(_, signature)| signature)
    }

    /// The outstanding deferred fetch, if any.
    pub fn in_flight(&self) -> Option<&Ticket> {
        self.in_flight.as_ref()
    }

    /// Install pre-fetched data as the answer to `request`.
    pub fn seed(&mut self, request: ListRequest, response: ListResponse<E>) {
        let signature = request.signature();
        self.current = Some((request, signature));
        self.in_flight = None;
        self.previous = None;
        self.state = FetchState::Success(response);
    }

    /// Make `request` current, fetching it unless it already is.
    pub fn request<S>(&mut self, source: &S, request: ListRequest) -> Dispatch
    where
        S: DataSource<E> + ?Sized,
    {
        if self.is_current(&request) {
            return Dispatch::Unchanged;
        }
        let signature = request.signature();
        self.issue(source, request, signature)
    }

    /// Whether `request` is already the one this adapter holds or is loading.
    /// A failed request is never current, so asking for it again refetches.
    pub fn is_current(&self, request: &ListRequest) -> bool {
        matches!(self.state, FetchState::Loading | FetchState::Success(_))
            && self.signature() == Some(&request.signature())
    }

    /// Re-issue the current request, e.g. after an error.
    pub fn retry<S>(&mut self, source: &S) -> Dispatch
    where
        S: DataSource<E> + ?Sized,
    {
        match self.current.take() {
            Some((request, signature)) => self.issue(source, request, signature),
            None => Dispatch::Unchanged,
        }
    }

    fn issue<S>(&mut self, source: &S, request: ListRequest, signature: Signature) -> Dispatch
    where
        S: DataSource<E> + ?Sized,
    {
        let ticket = Ticket {
            seq: self.next_seq,
            signature: signature.clone(),
        };
        self.next_seq += 1;
        tracing::debug!(seq = ticket.seq, request = %signature, "issuing fetch");

        let answer = source.fetch(&request);
        self.current = Some((request, signature));
        self.in_flight = None;
        if let FetchState::Success(response) = std::mem::replace(&mut self.state, FetchState::Loading) {
            self.previous = Some(response);
        }

        match answer {
            Fetch::Ready(response) => {
                self.previous = None;
                self.state = FetchState::Success(response);
                Dispatch::Resolved
            }
            Fetch::Failed(error) => {
                tracing::debug!(seq = ticket.seq, error = %error, "fetch failed");
                self.state = FetchState::Error(error);
                Dispatch::Resolved
            }
            Fetch::Pending => {
                self.in_flight = Some(ticket.clone());
                Dispatch::Pending(ticket)
            }
        }
    }

    /// Deliver the answer to a deferred fetch. Stale answers are dropped.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        result: Result<ListResponse<E>, FetchError>,
    ) -> Completion {
        let awaited = self.in_flight.as_ref() == Some(ticket);
        if !awaited || self.signature() != Some(&ticket.signature) {
            tracing::debug!(seq = ticket.seq, "discarding stale fetch result");
            return Completion::Stale;
        }
        self.in_flight = None;
        self.state = match result {
            Ok(response) => {
                self.previous = None;
                FetchState::Success(response)
            }
            Err(error) => FetchState::Error(error),
        };
        Completion::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::PendingSource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request(q: &str) -> ListRequest {
        let mut request = ListRequest::new(20);
        request.filters.insert("q".into(), ParamValue::text(q));
        request
    }

    fn response(names: &[&str]) -> ListResponse<Value> {
        let items: Vec<Value> = names.iter().map(|name| json!({"id": name})).collect();
        let total = items.len() as u64;
        ListResponse::new(items, total)
    }

    #[test]
    fn signatures_ignore_insertion_order() {
        let mut a = ListRequest::new(20);
        a.filters.insert("q".into(), ParamValue::text("x"));
        a.filters.insert("status".into(), ParamValue::text("open"));
        let mut b = ListRequest::new(20);
        b.filters.insert("status".into(), ParamValue::text("open"));
        b.filters.insert("q".into(), ParamValue::text("x"));
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.signature(), request("y").signature());
    }

    #[test]
    fn synchronous_source_resolves_immediately() {
        let source = |_: &ListRequest| Fetch::Ready(response(&["a"]));
        let mut adapter = Adapter::new();
        assert_eq!(adapter.request(&source, request("a")), Dispatch::Resolved);
        assert_eq!(adapter.response().map(|r| r.total), Some(1));
    }

    #[test]
    fn failure_is_state_not_panic() {
        let source = |_: &ListRequest| Fetch::<ListResponse<Value>>::Failed(FetchError::new("boom"));
        let mut adapter = Adapter::new();
        adapter.request(&source, request("a"));
        assert_eq!(adapter.state(), &FetchState::Error(FetchError::new("boom")));
    }

    #[test]
    fn identical_request_is_not_reissued() {
        let source = PendingSource::new();
        let mut adapter: Adapter<Value> = Adapter::new();
        assert!(matches!(adapter.request(&source, request("a")), Dispatch::Pending(_)));
        assert_eq!(adapter.request(&source, request("a")), Dispatch::Unchanged);
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let source = PendingSource::new();
        let mut adapter = Adapter::new();

        let Dispatch::Pending(first) = adapter.request(&source, request("ac")) else {
            panic!("expected a pending fetch");
        };
        let Dispatch::Pending(second) = adapter.request(&source, request("acme")) else {
            panic!("expected a pending fetch");
        };

        // The newer answer lands first, then the older one straggles in.
        assert_eq!(adapter.complete(&second, Ok(response(&["acme"]))), Completion::Applied);
        assert_eq!(adapter.complete(&first, Ok(response(&["ac", "acme"]))), Completion::Stale);

        assert_eq!(adapter.response().map(|r| r.total), Some(1));
        assert!(adapter.in_flight().is_none());
    }

    #[test]
    fn older_response_cannot_land_while_newer_is_loading() {
        let source = PendingSource::new();
        let mut adapter = Adapter::new();
        let Dispatch::Pending(first) = adapter.request(&source, request("a")) else {
            panic!("expected a pending fetch");
        };
        adapter.request(&source, request("b"));

        assert_eq!(adapter.complete(&first, Ok(response(&["a"]))), Completion::Stale);
        assert!(adapter.is_loading());
    }

    #[test]
    fn loading_keeps_the_last_response_available() {
        let mut adapter = Adapter::new();
        adapter.seed(request("a"), response(&["a"]));
        let source = PendingSource::new();
        adapter.request(&source, request("ab"));
        assert!(adapter.is_loading());
        assert!(adapter.response().is_none());
        assert_eq!(adapter.last_response().map(|r| r.total), Some(1));
    }

    #[test]
    fn retry_reissues_after_error() {
        let source = PendingSource::new();
        let mut adapter: Adapter<Value> = Adapter::new();
        let Dispatch::Pending(ticket) = adapter.request(&source, request("a")) else {
            panic!("expected a pending fetch");
        };
        adapter.complete(&ticket, Err(FetchError::new("timeout")));
        assert_eq!(adapter.state().label(), "error");

        assert!(matches!(adapter.retry(&source), Dispatch::Pending(_)));
        assert!(adapter.is_loading());
        assert_eq!(source.requests().len(), 2);
    }

    #[test]
    fn requesting_a_failed_request_again_refetches() {
        let source = |_: &ListRequest| Fetch::<ListResponse<Value>>::Failed(FetchError::new("boom"));
        let mut adapter = Adapter::new();
        assert_eq!(adapter.request(&source, request("a")), Dispatch::Resolved);
        assert!(!adapter.is_current(&request("a")));

        let pending = PendingSource::new();
        assert!(matches!(adapter.request(&pending, request("a")), Dispatch::Pending(_)));
        assert_eq!(pending.requests().len(), 1);
    }

    #[test]
    fn answer_to_a_superseded_retry_is_discarded() {
        let source = PendingSource::new();
        let mut adapter = Adapter::new();
        let Dispatch::Pending(first) = adapter.request(&source, request("a")) else {
            panic!("expected a pending fetch");
        };
        let Dispatch::Pending(second) = adapter.retry(&source) else {
            panic!("expected a pending fetch");
        };
        assert_eq!(first.signature, second.signature);

        assert_eq!(adapter.complete(&first, Ok(response(&["old"]))), Completion::Stale);
        assert!(adapter.is_loading());
        assert_eq!(adapter.complete(&second, Ok(response(&["new", "newer"]))), Completion::Applied);
        assert_eq!(adapter.response().map(|r| r.total), Some(2));
        assert_eq!(adapter.complete(&second, Ok(response(&["again"]))), Completion::Stale);
    }

    #[test]
    fn seeded_data_satisfies_the_first_request() {
        let source = PendingSource::new();
        let mut adapter = Adapter::new();
        adapter.seed(request("a"), response(&["a"]));
        assert_eq!(adapter.request(&source, request("a")), Dispatch::Unchanged);
        assert!(source.requests().is_empty());
        assert!(adapter.response().is_some());
    }

    #[test]
    fn dotted_stats() {
        let stats = json!({"total": 3, "byStatus": {"active": 2}});
        let Value::Object(stats) = stats else {
            unreachable!()
        };
        assert_eq!(stat(&stats, "total"), Some(&json!(3)));
        assert_eq!(stat(&stats, "byStatus.active"), Some(&json!(2)));
        assert_eq!(stat(&stats, "byStatus.closed"), None);
    }
}
