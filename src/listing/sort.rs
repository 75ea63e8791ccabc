//! Column sort state.
//!
//! Sort lives in the address as `sortBy` / `sortOrder`. Clicking a column cycles
//! unsorted → descending → ascending → descending; clicking a different column
//! starts that column at descending. Every sort write resets the page.

use crate::address::{AddressState, Patch, SORT_BY, SORT_ORDER};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Arrow shown next to a sorted column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub by: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    pub fn from_address(address: &AddressState) -> Self {
        Self {
            by: address.text(SORT_BY).map(str::to_string),
            order: address
                .text(SORT_ORDER)
                .and_then(SortOrder::parse)
                .unwrap_or_default(),
        }
    }

    /// The state after clicking `column`.
    pub fn toggled(&self, column: &str) -> SortState {
        match &self.by {
            Some(current) if current == column => SortState {
                by: self.by.clone(),
                order: self.order.flipped(),
            },
            _ => SortState {
                by: Some(column.to_string()),
                order: SortOrder::Desc,
            },
        }
    }

    /// Sort order for a column header, if that column is the sorted one.
    pub fn order_for(&self, column: &str) -> Option<SortOrder> {
        (self.by.as_deref() == Some(column)).then_some(self.order)
    }

    /// Patch writing this state. Always touches both keys, so it resets the page.
    pub fn patch(&self) -> Patch {
        let patch = match &self.by {
            Some(by) => Patch::new().set(SORT_BY, by.as_str()),
            None => Patch::new().remove(SORT_BY),
        };
        patch.set(SORT_ORDER, self.order.as_str())
    }
}
