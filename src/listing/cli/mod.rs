//! # CLI Behavior
//!
//! This is **one possible UI client** for the listing engine, used for demos,
//! scripting and end-to-end tests. It is the only place that knows about
//! terminal I/O, exit codes and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the library.
//!
//! ## Commands
//!
//! - `listing render <CONFIG> --data <JSON>`: build the page for an address and
//!   print it, as a styled terminal rendering or as JSON (`--json`).
//! - `listing patch <CONFIG> --address <Q> --set status=open`: print the address
//!   that results from one user action.
//! - `listing window --total 45 --page 2`: print the page window.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers
//! - `render`: Layout math and template rendering
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
