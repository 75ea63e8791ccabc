//! # Filters
//!
//! A listing declares its filters as [`FilterDescriptor`]s. Each filter's key is
//! also its address parameter, so the current value of every filter can always be
//! recovered from the address alone.
//!
//! Resolution order (later wins):
//!
//! 1. The filter's no-op value (`""`, `"all"`, `false`).
//! 2. Host presets. These are never written to the address, and may name keys
//!    that are not declared filters (e.g. a fixed `category`); those are passed
//!    through to the data source as-is.
//! 3. Whatever the address carries.
//!
//! Because the address never carries no-op values, a preset cannot be cleared by
//! choosing the no-op option; it can only be overridden by a concrete value.

use crate::address::{AddressSchema, AddressState, ParamKind, ParamValue, Patch};
use crate::error::{ListingError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Search,
    Select,
    Toggle,
}

impl FilterKind {
    /// The value meaning "not applied".
    pub fn noop(self) -> ParamValue {
        match self {
            FilterKind::Search => ParamValue::text(""),
            FilterKind::Select => ParamValue::text("all"),
            FilterKind::Toggle => ParamValue::Flag(false),
        }
    }

    pub fn param_kind(self) -> ParamKind {
        match self {
            FilterKind::Search | FilterKind::Select => ParamKind::Text,
            FilterKind::Toggle => ParamKind::Flag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
    #[serde(default)]
    pub options: Vec<FilterOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FilterDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            placeholder: None,
        }
    }

    pub fn with_options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| FilterOption {
                value: value.into(),
                label: label.into(),
            })
            .collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Label of the option currently selected, for select filters.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}

/// Host-supplied filter values that are never persisted in the address.
pub type Presets = IndexMap<String, ParamValue>;

/// A resolved filter value and whether it actually filters anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub value: ParamValue,
    pub active: bool,
}

/// The outcome of [`resolve_values`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterValues {
    values: BTreeMap<String, Resolved>,
}

impl FilterValues {
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key).map(|resolved| &resolved.value)
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|resolved| resolved.active)
    }

    /// Values that differ from their no-op, in key order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values
            .iter()
            .filter(|(_, resolved)| resolved.active)
            .map(|(key, resolved)| (key.as_str(), &resolved.value))
    }

    pub fn any_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// The filter part of a fetch request: only values that filter something.
    pub fn to_request(&self) -> BTreeMap<String, ParamValue> {
        self.active()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }
}

/// Resolve every filter's current value. Pure.
pub fn resolve_values(
    filters: &[FilterDescriptor],
    address: &AddressState,
    presets: &Presets,
) -> FilterValues {
    let mut values = BTreeMap::new();
    for filter in filters {
        values.insert(
            filter.key.clone(),
            Resolved {
                value: filter.kind.noop(),
                active: false,
            },
        );
    }

    let noop_of = |key: &str| {
        filters
            .iter()
            .find(|filter| filter.key == key)
            .map(|filter| filter.kind.noop())
    };

    for (key, value) in presets {
        let active = noop_of(key).map_or(true, |noop| &noop != value);
        values.insert(
            key.clone(),
            Resolved {
                value: value.clone(),
                active,
            },
        );
    }

    for filter in filters {
        if let Some(value) = address.get(&filter.key) {
            values.insert(
                filter.key.clone(),
                Resolved {
                    value: value.clone(),
                    active: value != &filter.kind.noop(),
                },
            );
        }
    }

    FilterValues { values }
}

/// Declare every filter key in an address schema.
pub fn declare(filters: &[FilterDescriptor], schema: AddressSchema) -> AddressSchema {
    filters.iter().fold(schema, |schema, filter| {
        schema.with_param(&filter.key, filter.kind.param_kind(), filter.kind.noop())
    })
}

/// Patch that sets one filter.
pub fn set_filter(filters: &[FilterDescriptor], key: &str, value: ParamValue) -> Result<Patch> {
    let filter = filters
        .iter()
        .find(|filter| filter.key == key)
        .ok_or_else(|| ListingError::UnknownFilter(key.to_string()))?;

    let value = match (filter.kind, value) {
        (FilterKind::Toggle, ParamValue::Text(text)) => match text.as_str() {
            "true" => ParamValue::Flag(true),
            "false" | "" => ParamValue::Flag(false),
            _ => {
                return Err(ListingError::InvalidArgument(format!(
                    "{key} expects true or false, got {text:?}"
                )))
            }
        },
        (FilterKind::Search | FilterKind::Select, ParamValue::Flag(flag)) => {
            ParamValue::Text(flag.to_string())
        }
        (_, value) => value,
    };

    Ok(Patch::new().set(key, value))
}

/// Patch that resets every declared filter.
pub fn clear_filters(filters: &[FilterDescriptor]) -> Patch {
    filters
        .iter()
        .fold(Patch::new(), |patch, filter| patch.remove(&filter.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{apply, decode, PAGE};
    use pretty_assertions::assert_eq;

    fn filters() -> Vec<FilterDescriptor> {
        vec![
            FilterDescriptor::new("q", "Search", FilterKind::Search),
            FilterDescriptor::new("status", "Status", FilterKind::Select)
                .with_options([("all", "All"), ("active", "Active"), ("closed", "Closed")]),
            FilterDescriptor::new("hot", "Hotlist only", FilterKind::Toggle),
        ]
    }

    fn schema() -> AddressSchema {
        declare(&filters(), AddressSchema::new())
    }

    #[test]
    fn defaults_are_noops() {
        let values = resolve_values(&filters(), &AddressState::default(), &Presets::new());
        assert_eq!(values.get("q"), Some(&ParamValue::text("")));
        assert_eq!(values.get("status"), Some(&ParamValue::text("all")));
        assert_eq!(values.get("hot"), Some(&ParamValue::Flag(false)));
        assert!(!values.any_active());
        assert!(values.to_request().is_empty());
    }

    #[test]
    fn address_overrides_presets() {
        let mut presets = Presets::new();
        presets.insert("status".into(), ParamValue::text("active"));
        presets.insert("category".into(), ParamValue::text("client"));

        let preset_only = resolve_values(&filters(), &AddressState::default(), &presets);
        assert_eq!(preset_only.get("status"), Some(&ParamValue::text("active")));
        assert!(preset_only.is_active("category"));

        let address = decode("?status=closed", &schema());
        let deep_linked = resolve_values(&filters(), &address, &presets);
        assert_eq!(deep_linked.get("status"), Some(&ParamValue::text("closed")));
        assert_eq!(deep_linked.get("category"), Some(&ParamValue::text("client")));
    }

    #[test]
    fn noop_preset_is_inactive() {
        let mut presets = Presets::new();
        presets.insert("status".into(), ParamValue::text("all"));
        let values = resolve_values(&filters(), &AddressState::default(), &presets);
        assert!(!values.is_active("status"));
    }

    #[test]
    fn unknown_address_keys_do_not_resolve() {
        let address = decode("?legacy=1&q=acme", &schema());
        let values = resolve_values(&filters(), &address, &Presets::new());
        assert_eq!(values.get("legacy"), None);
        assert_eq!(
            values.to_request(),
            BTreeMap::from([("q".to_string(), ParamValue::text("acme"))])
        );
    }

    #[test]
    fn set_filter_resets_page() {
        let schema = schema();
        let address = decode("?q=acme&page=3", &schema);
        let patch = set_filter(&filters(), "status", "active".into()).unwrap();
        let next = apply(&address, &patch, &schema);
        assert!(!next.contains(PAGE));
        assert_eq!(next.to_query(), "?q=acme&status=active");
    }

    #[test]
    fn toggle_accepts_text_booleans() {
        let patch = set_filter(&filters(), "hot", "true".into()).unwrap();
        let next = apply(&AddressState::default(), &patch, &schema());
        assert!(next.flag("hot"));

        let err = set_filter(&filters(), "hot", "maybe".into()).unwrap_err();
        assert!(matches!(err, ListingError::InvalidArgument(_)));
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let err = set_filter(&filters(), "nope", "x".into()).unwrap_err();
        assert!(matches!(err, ListingError::UnknownFilter(key) if key == "nope"));
    }

    #[test]
    fn clear_filters_keeps_sort_and_unknown_keys() {
        let schema = schema();
        let address = decode("?q=acme&status=active&hot=true&sortBy=title&legacy=1&page=2", &schema);
        let next = apply(&address, &clear_filters(&filters()), &schema);
        assert_eq!(next.to_query(), "?sortBy=title&legacy=1");
    }

    #[test]
    fn option_labels() {
        let status = &filters()[1];
        assert_eq!(status.option_label("active"), Some("Active"));
        assert_eq!(status.option_label("nope"), None);
    }
}
