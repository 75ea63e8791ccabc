//! Styles for the listing CLI.
//!
//! Templates refer to styles by semantic name (`header`, `time`, `tone_success`)
//! through the `style` filter; this module maps the names to `console` styles.
//! Code and templates never pick colors directly.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Shown in front of text whose style name is not registered.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const MUTED: &str = "muted";
    pub const ACTION: &str = "action";
    pub const STAT: &str = "stat";
    pub const HEADER: &str = "header";
    pub const CELL: &str = "cell";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const TAB: &str = "tab";
    pub const TAB_ACTIVE: &str = "tab_active";
    pub const FILTER: &str = "filter";
    pub const FILTER_ACTIVE: &str = "filter_active";
    pub const ERROR: &str = "error";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const INFO: &str = "info";
}

pub static THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    HashMap::from([
        ("title", Style::new().bold()),
        (names::MUTED, muted.clone()),
        (names::ACTION, Style::new().cyan()),
        ("section", Style::new().bold().underlined()),
        (names::STAT, Style::new().bold().cyan()),
        (names::HEADER, Style::new().bold()),
        (names::CELL, Style::new()),
        (names::PLACEHOLDER, muted.clone()),
        ("time", muted.clone().italic()),
        (names::TAB, muted),
        (names::TAB_ACTIVE, Style::new().bold().reverse()),
        (names::FILTER, Style::new()),
        (names::FILTER_ACTIVE, Style::new().yellow()),
        (names::ERROR, Style::new().red()),
        (names::SUCCESS, Style::new().green()),
        (names::WARNING, Style::new().yellow()),
        (names::INFO, Style::new().blue()),
        ("tone_neutral", Style::new()),
        ("tone_info", Style::new().blue()),
        ("tone_success", Style::new().green()),
        ("tone_warning", Style::new().yellow()),
        ("tone_danger", Style::new().red()),
        ("tone_accent", Style::new().magenta()),
    ])
});

/// Apply a named style. Unknown names are flagged even without color.
pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match THEME.get(name) {
        Some(_) if text.is_empty() => String::new(),
        Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
        Some(_) => text.to_string(),
        None => format!("{MISSING_STYLE_INDICATOR}{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escapes() {
        assert_eq!(apply(names::HEADER, "Title", false), "Title");
    }

    #[test]
    fn forced_color_emits_escapes() {
        assert!(apply(names::ERROR, "boom", true).contains("\u{1b}["));
    }

    #[test]
    fn unknown_styles_are_flagged() {
        assert_eq!(apply("typo", "Hello", false), "(!?)Hello");
    }
}
