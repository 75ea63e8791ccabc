//! # Address State
//!
//! The address (the query string of a shareable location) is the single source of
//! truth for everything a listing shows: filter values, sort, page and tab. This
//! module is the codec between that string and a typed [`AddressState`].
//!
//! ## Canonical Form
//!
//! A parameter is present only when its value differs from that parameter's
//! *no-op* value. The no-op values come from an [`AddressSchema`]:
//!
//! | Key | Type | No-op |
//! |-----|------|-------|
//! | search filter | text | `""` |
//! | select filter | text | `"all"` |
//! | toggle filter | flag | `false` |
//! | `page` | positive integer | `1` |
//! | `sortBy` | text | unset |
//! | `sortOrder` | `asc` / `desc` | `desc` |
//! | `tab` | text | first declared tab |
//!
//! Empty text is a no-op for every key, declared or not.
//!
//! ## Writing
//!
//! Writes are expressed as a [`Patch`] and applied by the pure reducer [`apply`]:
//! start from the current parameters, apply the patch, drop no-op values, and drop
//! `page` whenever the patch touches any other key. Changing a filter, sort or tab
//! always brings the user back to the first page.
//!
//! Keys the schema does not declare are carried through untouched, so an address
//! written by a newer renderer survives a round trip through an older one.
//! Malformed values for declared keys (`page=abc`, `sortOrder=up`) are treated as
//! absent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use url::form_urlencoded;

pub const PAGE: &str = "page";
pub const SORT_BY: &str = "sortBy";
pub const SORT_ORDER: &str = "sortOrder";
pub const TAB: &str = "tab";

/// Keys the engine owns. Filters may not use them.
pub const RESERVED_KEYS: [&str; 4] = [PAGE, SORT_BY, SORT_ORDER, TAB];

/// A single address parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Text(String),
}

impl ParamValue {
    pub fn text(value: impl Into<String>) -> Self {
        ParamValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            ParamValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(flag) => Some(*flag),
            ParamValue::Text(_) => None,
        }
    }

    /// The literal text written to the address.
    pub fn encoded(&self) -> Cow<'_, str> {
        match self {
            ParamValue::Flag(true) => Cow::Borrowed("true"),
            ParamValue::Flag(false) => Cow::Borrowed("false"),
            ParamValue::Text(text) => Cow::Borrowed(text),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Text(value.to_string())
    }
}

/// How a declared parameter's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Flag,
    Page,
    SortOrder,
}

impl ParamKind {
    /// Normalize a value for this kind. `None` means the value is malformed.
    fn normalize(self, value: &ParamValue) -> Option<ParamValue> {
        match (self, value) {
            (ParamKind::Text, ParamValue::Text(text)) => Some(ParamValue::Text(text.clone())),
            (ParamKind::Text, ParamValue::Flag(flag)) => Some(ParamValue::Text(flag.to_string())),
            (ParamKind::Flag, ParamValue::Flag(flag)) => Some(ParamValue::Flag(*flag)),
            (ParamKind::Flag, ParamValue::Text(text)) => match text.as_str() {
                "true" => Some(ParamValue::Flag(true)),
                "false" => Some(ParamValue::Flag(false)),
                _ => None,
            },
            (ParamKind::Page, ParamValue::Text(text)) => text
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .map(|page| ParamValue::Text(page.to_string())),
            (ParamKind::SortOrder, ParamValue::Text(text)) => {
                matches!(text.as_str(), "asc" | "desc").then(|| ParamValue::Text(text.clone()))
            }
            (ParamKind::Page | ParamKind::SortOrder, ParamValue::Flag(_)) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub kind: ParamKind,
    pub noop: ParamValue,
}

/// The declared parameters of one listing.
///
/// Always contains the reserved `page`, `sortBy` and `sortOrder` keys; `tab` is
/// declared only for tabbed listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSchema {
    params: IndexMap<String, ParamSpec>,
}

impl Default for AddressSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSchema {
    pub fn new() -> Self {
        Self {
            params: IndexMap::new(),
        }
        .with_param(PAGE, ParamKind::Page, ParamValue::text("1"))
        .with_param(SORT_BY, ParamKind::Text, ParamValue::text(""))
        .with_param(SORT_ORDER, ParamKind::SortOrder, ParamValue::text("desc"))
    }

    pub fn with_param(mut self, key: impl Into<String>, kind: ParamKind, noop: ParamValue) -> Self {
        self.params.insert(key.into(), ParamSpec { kind, noop });
        self
    }

    /// Declare the `tab` key, whose no-op value is the default tab.
    pub fn with_default_tab(self, tab: impl Into<String>) -> Self {
        self.with_param(TAB, ParamKind::Text, ParamValue::Text(tab.into()))
    }

    pub fn spec(&self, key: &str) -> Option<&ParamSpec> {
        self.params.get(key)
    }

    pub fn is_declared(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn is_noop(&self, key: &str, value: &ParamValue) -> bool {
        if matches!(value, ParamValue::Text(text) if text.is_empty()) {
            return true;
        }
        self.params.get(key).is_some_and(|spec| &spec.noop == value)
    }

    fn normalize(&self, key: &str, value: &ParamValue) -> Option<ParamValue> {
        match self.params.get(key) {
            Some(spec) => spec.kind.normalize(value),
            // Undeclared keys are carried as the text they arrived with.
            None => Some(ParamValue::Text(value.encoded().into_owned())),
        }
    }
}

/// Decoded address parameters, in address order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressState {
    params: IndexMap<String, ParamValue>,
}

impl AddressState {
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(ParamValue::as_flag).unwrap_or(false)
    }

    /// The requested page, 1 when absent. Not clamped to the data.
    pub fn page(&self) -> u32 {
        self.text(PAGE)
            .and_then(|page| page.parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    pub fn tab(&self) -> Option<&str> {
        self.text(TAB)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serialize to `?k=v&...`, or `""` when nothing is set.
    pub fn to_query(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, &value.encoded());
        }
        format!("?{}", serializer.finish())
    }
}

impl fmt::Display for AddressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

/// A set of address writes. `None` removes a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    changes: IndexMap<String, Option<ParamValue>>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.changes.insert(key.into(), Some(value.into()));
        self
    }

    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.changes.insert(key.into(), None);
        self
    }

    /// Combine two patches; `other` wins on shared keys.
    pub fn merge(mut self, other: Patch) -> Self {
        self.changes.extend(other.changes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn touches(&self, key: &str) -> bool {
        self.changes.contains_key(key)
    }

    /// True when the patch writes anything other than `page`.
    pub fn resets_page(&self) -> bool {
        self.changes.keys().any(|key| key != PAGE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ParamValue>)> {
        self.changes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }
}

/// Decode an address (`?a=b`, `a=b`, or `/path?a=b#frag`) into canonical state.
pub fn decode(address: &str, schema: &AddressSchema) -> AddressState {
    let mut params = IndexMap::new();
    for (key, raw) in form_urlencoded::parse(query_part(address).as_bytes()) {
        if key.is_empty() || params.contains_key(&*key) {
            continue;
        }
        let Some(value) = schema.normalize(&key, &ParamValue::Text(raw.into_owned())) else {
            tracing::debug!(key = %key, "ignoring malformed address parameter");
            continue;
        };
        if schema.is_noop(&key, &value) {
            continue;
        }
        params.insert(key.into_owned(), value);
    }
    AddressState { params }
}

/// Apply a patch to the current state. Pure; navigation is the caller's concern.
pub fn apply(state: &AddressState, patch: &Patch, schema: &AddressSchema) -> AddressState {
    let mut params = state.params.clone();
    for (key, change) in &patch.changes {
        match change.as_ref().and_then(|value| schema.normalize(key, value)) {
            Some(value) => {
                params.insert(key.clone(), value);
            }
            None => {
                params.shift_remove(key);
            }
        }
    }
    if patch.resets_page() {
        params.shift_remove(PAGE);
    }
    params.retain(|key, value| !schema.is_noop(key, value));
    AddressState { params }
}

/// Apply a patch and serialize the result.
pub fn encode(state: &AddressState, patch: &Patch, schema: &AddressSchema) -> String {
    apply(state, patch, schema).to_query()
}

fn query_part(address: &str) -> &str {
    let address = address.split('#').next().unwrap_or_default();
    match address.split_once('?') {
        Some((_, query)) => query,
        None if address.contains('=') => address,
        None => "",
    }
}
