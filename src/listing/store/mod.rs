//! # Collaborators
//!
//! The remote data layer is not part of this crate. What lives here are the
//! in-process stand-ins the CLI and the tests bind in its place:
//!
//! - [`memory::InMemorySource`]: a [`crate::source::DataSource`] over a vector of
//!   JSON records. Filters, sorts and pages the way a backend would, and answers
//!   synchronously.
//! - [`memory::PendingSource`]: a source that never answers by itself. Every fetch
//!   is recorded and left pending, so tests can complete tickets in any order.
//! - [`memory::InMemoryDrafts`]: a [`crate::drafts::DraftSource`] with switchable
//!   failures for listing and deleting.

pub mod memory;
