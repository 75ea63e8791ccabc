//! # Entities
//!
//! The listing engine never knows the concrete shape of the records it shows.
//! Anything that can report a stable identifier and look up a field by a dotted
//! path (`account.name`, `owner.full_name`) can be listed.
//!
//! `serde_json::Value` objects implement [`Entity`] out of the box, which is what
//! the in-memory collaborators and the CLI use. Hosts with typed records can
//! implement the trait directly.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// A listable record.
pub trait Entity {
    /// The record's identifier. Used for row keys and detail links.
    fn id(&self) -> Cow<'_, str>;

    /// Look up a field by dotted path. `None` when the path does not resolve.
    fn field(&self, path: &str) -> Option<&Value>;
}

impl Entity for Value {
    fn id(&self) -> Cow<'_, str> {
        match self.get("id") {
            Some(Value::String(id)) => Cow::Borrowed(id.as_str()),
            Some(Value::Number(id)) => Cow::Owned(id.to_string()),
            _ => Cow::Borrowed(""),
        }
    }

    fn field(&self, path: &str) -> Option<&Value> {
        lookup(self, path)
    }
}

/// Resolve a dotted path against a JSON value.
///
/// Empty segments never match, so `"a..b"` and `""` resolve to `None`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| {
        if segment.is_empty() {
            None
        } else {
            current.get(segment)
        }
    })
}

/// Resolve a dotted path against the fields of a JSON object.
pub fn lookup_in<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let value = map.get(head)?;
    match rest {
        Some(rest) => lookup(value, rest),
        None => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_numeric_ids() {
        assert_eq!(json!({"id": "job-1"}).id(), "job-1");
        assert_eq!(json!({"id": 42}).id(), "42");
        assert_eq!(json!({"name": "no id"}).id(), "");
    }

    #[test]
    fn nested_lookup() {
        let job = json!({"account": {"name": "Acme", "owner": {"full_name": "Dee"}}});
        assert_eq!(job.field("account.name"), Some(&json!("Acme")));
        assert_eq!(job.field("account.owner.full_name"), Some(&json!("Dee")));
        assert_eq!(job.field("account.missing"), None);
        assert_eq!(job.field(""), None);
        assert_eq!(job.field("account..name"), None);
    }
}
