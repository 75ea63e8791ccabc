//! # Drafts
//!
//! A draft is the persisted partial state of an abandoned multi-step creation
//! flow. It is not the entity it would eventually produce, and the listing never
//! creates or advances one: it reads the acting user's drafts, offers a way back
//! into the wizard, and offers deletion.
//!
//! ## Visibility
//!
//! The drafts section is hidden entirely (no header, no empty placeholder) while
//! there are no known drafts, whether that is because the list came back empty,
//! is still loading for the first time, or failed. Once drafts are known they stay
//! listed through reloads and failures.
//!
//! ## Deletion
//!
//! Deletion is two-step: [`DraftRegistry::request_delete`] marks a draft as
//! pending confirmation, [`DraftRegistry::confirm_delete`] performs it. Nothing is
//! removed optimistically; a failed delete keeps the draft listed and queues an
//! error [`Notification`].

use crate::error::{ListingError, Result};
use crate::format::time_ago;
use crate::model::lookup_in;
use crate::source::{Fetch, FetchError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNTITLED: &str = "Untitled draft";

/// Parameter the wizard reads to pick up a draft.
pub const RESUME_PARAM: &str = "draft";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub last_saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub id: String,
    #[serde(default)]
    pub wizard_state: Option<WizardState>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Whatever partial entity data the wizard saved so far.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DraftRecord {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            wizard_state: None,
            updated_at: None,
            created_at,
            fields: Map::new(),
        }
    }

    pub fn with_progress(mut self, current_step: u32, total_steps: u32) -> Self {
        let state = self.wizard_state.get_or_insert(WizardState {
            current_step: 0,
            total_steps: 0,
            last_saved_at: None,
        });
        state.current_step = current_step;
        state.total_steps = total_steps;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Wizard progress in whole percent, clamped to `0..=100`.
    pub fn progress_percent(&self) -> u32 {
        self.wizard_state
            .as_ref()
            .map_or(0, |state| progress_percent(state.current_step, state.total_steps))
    }

    /// When the draft was last touched: last save, else last update, else creation.
    pub fn last_touched(&self) -> DateTime<Utc> {
        self.wizard_state
            .as_ref()
            .and_then(|state| state.last_saved_at)
            .or(self.updated_at)
            .unwrap_or(self.created_at)
    }

    pub fn field(&self, path: &str) -> Option<&Value> {
        lookup_in(&self.fields, path)
    }
}

/// `round(step / total * 100)`; zero total steps means no progress.
pub fn progress_percent(current_step: u32, total_steps: u32) -> u32 {
    if total_steps == 0 {
        return 0;
    }
    let percent = (f64::from(current_step) / f64::from(total_steps) * 100.0).round();
    percent.clamp(0.0, 100.0) as u32
}

fn enabled_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Route of the creation wizard; drafts resume at `{wizard_route}?draft={id}`.
    pub wizard_route: String,
    #[serde(default)]
    pub display_name_field: Option<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

impl DraftConfig {
    pub fn new(wizard_route: impl Into<String>) -> Self {
        Self {
            wizard_route: wizard_route.into(),
            display_name_field: None,
            enabled: true,
        }
    }

    pub fn resume_route(&self, id: &str) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair(RESUME_PARAM, id)
            .finish();
        let separator = if self.wizard_route.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.wizard_route)
    }
}

/// The "my drafts" binding.
pub trait DraftSource {
    fn list_mine(&self) -> Fetch<Vec<DraftRecord>>;
    fn delete(&mut self, id: &str) -> std::result::Result<(), FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the host to show once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: MessageLevel,
    pub content: String,
}

impl Notification {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftsState {
    Loading,
    Loaded,
    Failed(FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Failed,
}

/// One rendered draft row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftRow {
    pub id: String,
    pub name: String,
    pub progress: u32,
    pub step: Option<(u32, u32)>,
    pub last_touched: String,
    pub resume_route: String,
    pub pending_delete: bool,
}

type DisplayName = Box<dyn Fn(&DraftRecord) -> Option<String>>;

pub struct DraftRegistry {
    config: DraftConfig,
    source: Box<dyn DraftSource>,
    display_name: Option<DisplayName>,
    state: DraftsState,
    drafts: Vec<DraftRecord>,
    pending_delete: Option<String>,
    notifications: Vec<Notification>,
}

impl DraftRegistry {
    pub fn new<S>(config: DraftConfig, source: S) -> Self
    where
        S: DraftSource + 'static,
    {
        Self {
            config,
            source: Box::new(source),
            display_name: None,
            state: DraftsState::Loading,
            drafts: Vec::new(),
            pending_delete: None,
            notifications: Vec::new(),
        }
    }

    /// Host hook for a draft's human label. Returning `None` falls back to the
    /// configured display field.
    pub fn with_display_name<F>(mut self, display_name: F) -> Self
    where
        F: Fn(&DraftRecord) -> Option<String> + 'static,
    {
        self.display_name = Some(Box::new(display_name));
        self
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn state(&self) -> &DraftsState {
        &self.state
    }

    pub fn drafts(&self) -> &[DraftRecord] {
        &self.drafts
    }

    /// Ask the source for the current drafts.
    pub fn refresh(&mut self) {
        match self.source.list_mine() {
            Fetch::Ready(drafts) => self.loaded(Ok(drafts)),
            Fetch::Failed(error) => self.loaded(Err(error)),
            Fetch::Pending => self.state = DraftsState::Loading,
        }
    }

    /// Deliver the answer to a deferred `list_mine`.
    pub fn loaded(&mut self, result: std::result::Result<Vec<DraftRecord>, FetchError>) {
        match result {
            Ok(mut drafts) => {
                drafts.sort_by_key(|draft| std::cmp::Reverse(draft.last_touched()));
                tracing::debug!(count = drafts.len(), "drafts loaded");
                self.drafts = drafts;
                self.state = DraftsState::Loaded;
            }
            Err(error) => {
                tracing::warn!(error = %error, "could not load drafts");
                self.state = DraftsState::Failed(error);
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.config.enabled && !self.drafts.is_empty()
    }

    pub fn display_name(&self, draft: &DraftRecord) -> String {
        let from_hook = self.display_name.as_ref().and_then(|hook| hook(draft));
        from_hook
            .or_else(|| {
                let field = self.config.display_name_field.as_deref()?;
                match draft.field(field)? {
                    Value::String(text) => Some(text.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                }
            })
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn resume_route(&self, id: &str) -> String {
        self.config.resume_route(id)
    }

    /// Rows to show above the listing, or `None` when the section is hidden.
    pub fn rows(&self, now: DateTime<Utc>) -> Option<Vec<DraftRow>> {
        if !self.is_visible() {
            return None;
        }
        let rows = self
            .drafts
            .iter()
            .map(|draft| DraftRow {
                id: draft.id.clone(),
                name: self.display_name(draft),
                progress: draft.progress_percent(),
                step: draft
                    .wizard_state
                    .as_ref()
                    .filter(|state| state.total_steps > 0)
                    .map(|state| (state.current_step, state.total_steps)),
                last_touched: time_ago(draft.last_touched(), now),
                resume_route: self.resume_route(&draft.id),
                pending_delete: self.pending_delete.as_deref() == Some(draft.id.as_str()),
            })
            .collect();
        Some(rows)
    }

    /// Mark a draft for deletion; nothing is deleted until confirmed.
    pub fn request_delete(&mut self, id: &str) -> Result<()> {
        if !self.drafts.iter().any(|draft| draft.id == id) {
            return Err(ListingError::DraftNotFound(id.to_string()));
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn pending_delete(&self) -> Option<&DraftRecord> {
        let id = self.pending_delete.as_deref()?;
        self.drafts.iter().find(|draft| draft.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the draft awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Result<Deletion> {
        let id = self
            .pending_delete
            .take()
            .ok_or_else(|| ListingError::InvalidArgument("no draft deletion pending".into()))?;
        let name = self
            .drafts
            .iter()
            .find(|draft| draft.id == id)
            .map(|draft| self.display_name(draft))
            .unwrap_or_else(|| UNTITLED.to_string());

        match self.source.delete(&id) {
            Ok(()) => {
                self.drafts.retain(|draft| draft.id != id);
                self.notifications
                    .push(Notification::success(format!("Deleted draft \"{name}\"")));
                Ok(Deletion::Deleted)
            }
            Err(error) => {
                tracing::warn!(draft = %id, error = %error, "draft deletion failed");
                self.notifications.push(Notification::error(format!(
                    "Could not delete draft \"{name}\": {error}"
                )));
                Ok(Deletion::Failed)
            }
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
