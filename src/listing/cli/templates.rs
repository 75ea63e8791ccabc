//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone files
//! under `templates/` and embedded here with `include_str!`.
//!
//! Layout math (column widths, truncation, alignment) stays in Rust because it
//! needs Unicode-aware measuring; templates receive pre-padded text plus the
//! semantic style name to apply with the `style` filter. Every line a template
//! prints ends in an explicit newline; block tags that close a section use `-%}`
//! so that a skipped section leaves no blank line behind.

pub const LISTING_TEMPLATE: &str = include_str!("templates/listing.tmp");
pub const WINDOW_TEMPLATE: &str = include_str!("templates/window.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
