//! Host data seam consumed by blocks.
//!
//! Data fetching is the hosting platform's job. Blocks never issue network
//! calls; they read whatever the host has cached through [`WidgetApi`] and
//! render what is there right now. The host re-renders the element when a
//! fetch completes, so a block only ever distinguishes "still loading" from
//! "this is the data".

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Availability of data the host fetches on a widget's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataState<T> {
    /// The host has not completed the fetch yet.
    Loading,
    /// The fetched data, possibly empty.
    Ready(T),
}

impl<T> DataState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            DataState::Loading => None,
            DataState::Ready(data) => Some(data),
        }
    }
}

/// One entry of the host's user directory.
///
/// `fields` holds the installation-defined profile fields keyed by field id,
/// start dates included. All values arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl UserProfile {
    /// "First Last", tolerating either name part being empty.
    pub fn display_name(&self) -> String {
        let mut name = String::new();
        for part in [&self.first_name, &self.last_name] {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(part);
        }
        name
    }

    /// A profile field by id, trimmed, `None` when absent or blank.
    pub fn field(&self, id: &str) -> Option<&str> {
        let value = self.fields.get(id)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Helper surface the hosting application hands to every block.
pub trait WidgetApi: Send + Sync {
    /// Language of the surrounding content, e.g. `en_US`.
    fn content_language(&self) -> String;

    /// The user directory the widget displays from.
    fn user_profiles(&self) -> DataState<Vec<UserProfile>>;

    /// Invited-but-not-yet-activated users of the named network. Hosts
    /// without a pending-user facility report an empty directory.
    fn pending_profiles(&self, _network_id: &str) -> DataState<Vec<UserProfile>> {
        DataState::Ready(Vec::new())
    }

    /// Today's date for windowing. Overridable so previews and tests can
    /// pin the calendar.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// In-memory [`WidgetApi`] backed by fixed data.
///
/// Serves the preview binary and tests; real hosts supply their own
/// implementation wired to the platform backend.
pub struct StaticDirectory {
    content_language: String,
    profiles: DataState<Vec<UserProfile>>,
    pending: Vec<UserProfile>,
    today: Option<NaiveDate>,
}

impl StaticDirectory {
    /// A directory that already holds `profiles`.
    pub fn new(profiles: Vec<UserProfile>) -> Self {
        Self {
            content_language: "en_US".to_string(),
            profiles: DataState::Ready(profiles),
            pending: Vec::new(),
            today: None,
        }
    }

    /// A directory whose fetch never completes.
    pub fn loading() -> Self {
        Self {
            content_language: "en_US".to_string(),
            profiles: DataState::Loading,
            pending: Vec::new(),
            today: None,
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.content_language = language.to_string();
        self
    }

    pub fn with_pending(mut self, pending: Vec<UserProfile>) -> Self {
        self.pending = pending;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

impl WidgetApi for StaticDirectory {
    fn content_language(&self) -> String {
        self.content_language.clone()
    }

    fn user_profiles(&self) -> DataState<Vec<UserProfile>> {
        self.profiles.clone()
    }

    fn pending_profiles(&self, _network_id: &str) -> DataState<Vec<UserProfile>> {
        DataState::Ready(self.pending.clone())
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
