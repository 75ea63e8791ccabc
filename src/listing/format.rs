//! # Value Formatting
//!
//! Columns, card meta fields and stat cards carry an optional [`FormatKind`]. The
//! kind selects a formatter from a fixed strategy table; there is no type-based
//! branching on the value itself beyond parsing what the formatter needs.
//!
//! | Kind | Output |
//! |------|--------|
//! | `date` | Calendar date (`settings.date_format`, `1/15/2025` by default) |
//! | `relative-date` | Elapsed time from now (`3 days ago`) |
//! | `currency` | Currency symbol + grouped number (`$1,234.50`) |
//! | `number` | Grouped number (`1,234.5`) |
//! | `status` | Badge looked up in the listing's status styles, raw text if unmapped |
//!
//! Null and missing values always render as the placeholder glyph. Values a
//! formatter cannot parse (a `date` column holding `"soon"`) fall back to their
//! plain text.

use crate::settings::Settings;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Write;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    Date,
    RelativeDate,
    Currency,
    Number,
    Status,
}

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
    Accent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStyle {
    pub label: String,
    #[serde(default)]
    pub tone: Tone,
}

pub type StatusStyles = IndexMap<String, StatusStyle>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

/// One formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// True when `text` is the placeholder glyph.
    pub empty: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
            empty: false,
        }
    }

    pub fn placeholder(ctx: &FormatContext<'_>) -> Self {
        Self {
            text: ctx.settings.placeholder.clone(),
            badge: None,
            empty: true,
        }
    }

    fn badge(label: String, tone: Tone) -> Self {
        Self {
            text: label.clone(),
            badge: Some(Badge { label, tone }),
            empty: false,
        }
    }
}

/// Everything a formatter may consult besides the value.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    pub now: DateTime<Utc>,
    pub settings: &'a Settings,
    pub status_styles: &'a StatusStyles,
}

type Formatter = fn(&Value, &FormatContext<'_>) -> Cell;

fn formatter(kind: FormatKind) -> Formatter {
    match kind {
        FormatKind::Date => format_date,
        FormatKind::RelativeDate => format_relative_date,
        FormatKind::Currency => format_currency,
        FormatKind::Number => format_number_cell,
        FormatKind::Status => format_status,
    }
}

/// Format a possibly-missing value.
pub fn format_value(kind: Option<FormatKind>, value: Option<&Value>, ctx: &FormatContext<'_>) -> Cell {
    match value {
        None | Some(Value::Null) => Cell::placeholder(ctx),
        Some(value) => match kind {
            Some(kind) => formatter(kind)(value, ctx),
            None => plain(value, ctx),
        },
    }
}

/// Text for a value with no format tag.
pub fn plain(value: &Value, ctx: &FormatContext<'_>) -> Cell {
    match value {
        Value::Null => Cell::placeholder(ctx),
        Value::String(text) => Cell::text(text.as_str()),
        Value::Bool(true) => Cell::text("Yes"),
        Value::Bool(false) => Cell::text("No"),
        Value::Number(number) => Cell::text(number.to_string()),
        Value::Array(values) => {
            let parts: Vec<String> = values
                .iter()
                .map(|value| plain(value, ctx))
                .filter(|cell| !cell.empty)
                .map(|cell| cell.text)
                .collect();
            if parts.is_empty() {
                Cell::placeholder(ctx)
            } else {
                Cell::text(parts.join(", "))
            }
        }
        // Nested records show their display name, the way an account shows its name.
        Value::Object(map) => ["name", "full_name", "label", "title"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map_or_else(|| Cell::placeholder(ctx), Cell::text),
    }
}

/// Parse a timestamp: RFC 3339, `YYYY-MM-DD`, naive date-time, or epoch millis.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn format_date(value: &Value, ctx: &FormatContext<'_>) -> Cell {
    match parse_timestamp(value) {
        Some(timestamp) => {
            let mut text = String::new();
            match write!(text, "{}", timestamp.format(&ctx.settings.date_format)) {
                Ok(()) => Cell::text(text),
                Err(_) => {
                    tracing::warn!(format = %ctx.settings.date_format, "invalid date format");
                    Cell::placeholder(ctx)
                }
            }
        }
        None => plain(value, ctx),
    }
}

fn format_relative_date(value: &Value, ctx: &FormatContext<'_>) -> Cell {
    match parse_timestamp(value) {
        Some(timestamp) => Cell::text(time_ago(timestamp, ctx.now)),
        None => plain(value, ctx),
    }
}

fn format_currency(value: &Value, ctx: &FormatContext<'_>) -> Cell {
    match parse_number(value) {
        Some(amount) => {
            let sign = sign_of(amount);
            Cell::text(format!(
                "{sign}{}{}",
                ctx.settings.currency_symbol,
                group_decimal(amount.abs(), true)
            ))
        }
        None => plain(value, ctx),
    }
}

fn format_number_cell(value: &Value, ctx: &FormatContext<'_>) -> Cell {
    match parse_number(value) {
        Some(number) => Cell::text(format_number(number)),
        None => plain(value, ctx),
    }
}

fn format_status(value: &Value, ctx: &FormatContext<'_>) -> Cell {
    let raw = plain(value, ctx);
    match ctx.status_styles.get(&raw.text) {
        Some(style) => Cell::badge(style.label.clone(), style.tone),
        None => raw,
    }
}

/// Humanized elapsed time, e.g. `3 days ago`. Future instants read as `now`.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    timeago::Formatter::new().convert(elapsed.to_std().unwrap_or_default())
}

/// Group thousands: `1234567` → `1,234,567`; fractions keep up to two digits.
pub fn format_number(number: f64) -> String {
    let sign = sign_of(number);
    format!("{sign}{}", group_decimal(number.abs(), false))
}

/// Minus sign only when the value is still negative at two decimals.
fn sign_of(number: f64) -> &'static str {
    if (number * 100.0).round() < 0.0 {
        "-"
    } else {
        ""
    }
}

fn group_decimal(number: f64, fixed_cents: bool) -> String {
    let rounded = format!("{number:.2}");
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = group_digits(whole);
    if fraction == "00" {
        grouped
    } else if fixed_cents {
        format!("{grouped}.{fraction}")
    } else {
        format!("{grouped}.{}", fraction.trim_end_matches('0'))
    }
}

fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }
    result
}
