//! # Listing Architecture
//!
//! Listing is a **UI-agnostic engine for configuration-driven entity listings**:
//! paginated, filterable, sortable, optionally tabbed collections of arbitrary
//! records, whose entire visible state can be rebuilt from a shareable address
//! string. A "resume your draft" section can be layered on top.
//!
//! It is a library that happens to have a CLI client, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, paints view models, terminal I/O       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Orchestration (view.rs)                                    │
//! │  - sync(address) → fetch; dispatch(action) → new address    │
//! │  - render(now) → RenderedListing                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (render.rs, format.rs)                        │
//! │  - Table / card / custom bodies, formatting strategy table  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Fetch State (source.rs, tabs.rs, drafts.rs)                │
//! │  - One adapter state machine per panel, stale-result guard  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pure State (address.rs, filters.rs, sort.rs, pagination.rs)│
//! │  - Reducers over the address; no effects                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Address Is the State
//!
//! Every piece of user-visible state (filter values, sort, page, active tab) is
//! decoded from the address on each render. User interactions never mutate that
//! state directly: they produce a [`address::Patch`], the patch is encoded into a
//! new address, and the new address goes to the host's [`view::Navigator`]. Host
//! presets are the one input that is not in the address; they are applied beneath
//! it and can always be overridden by it.
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing in the library writes to stdout/stderr, exits the process, or performs
//! network access. Data arrives through [`source::DataSource`] and
//! [`drafts::DraftSource`] bindings, synchronously or as tickets completed later.
//!
//! ## Testing Strategy
//!
//! - Pure modules carry thorough unit tests, including property tests for the
//!   address codec.
//! - Fetch state is tested against [`store::memory`] collaborators, including a
//!   source that leaves every fetch pending so completions can arrive out of order.
//! - The CLI is tested end to end against the demo configs in `demos/`.
//!
//! ## Module Overview
//!
//! - [`address`]: Address codec, schema and patches
//! - [`filters`]: Filter descriptors and value resolution
//! - [`sort`]: Column sort state and toggling
//! - [`pagination`]: Page window math and page moves
//! - [`source`]: Data source binding and the per-panel adapter
//! - [`tabs`]: Tab descriptors and per-tab isolation
//! - [`drafts`]: Draft records, the registry, and deletion
//! - [`format`]: Value formatting strategy table
//! - [`render`]: View model construction and host hooks
//! - [`view`]: The orchestrating [`view::ListingView`]
//! - [`config`]: Listing configuration (TOML)
//! - [`settings`]: Engine settings (env / file / defaults)
//! - [`model`]: The [`model::Entity`] trait
//! - [`store`]: In-memory collaborators
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated terminal output for the binary (not part of the lib API)

pub mod address;
pub mod config;
pub mod drafts;
pub mod error;
pub mod filters;
pub mod format;
pub mod model;
pub mod pagination;
pub mod render;
pub mod settings;
pub mod sort;
pub mod source;
pub mod store;
pub mod tabs;
pub mod view;
