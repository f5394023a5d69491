//! Session model definitions.

use jiff::{tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::grouping::parse_created_at;

/// A single conversation or work context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Unique identifier for the session
    pub id: i64,

    /// Display name; the only field that can change after creation
    pub name: String,

    /// Creation time as reported by the backend. Kept as text so that
    /// malformed values can still be listed.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Team the session runs with, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

impl Session {
    /// Creation instant, with civil times read in `tz`.
    ///
    /// Missing or unparseable values yield [`Timestamp::MIN`].
    pub fn created_timestamp(&self, tz: &TimeZone) -> Timestamp {
        parse_created_at(self.created_at.as_deref(), tz)
    }
}

/// Fields supplied when creating a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSession {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

/// Sessions partitioned by recency.
///
/// Every session lands in exactly one bucket.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionGroups {
    pub today: Vec<Session>,
    pub yesterday: Vec<Session>,
    pub last7_days: Vec<Session>,
    pub last30_days: Vec<Session>,
    pub older: Vec<Session>,
}

impl SessionGroups {
    /// Buckets paired with their display labels, most recent first.
    pub fn labelled(&self) -> [(&'static str, &[Session]); 5] {
        [
            ("Today", self.today.as_slice()),
            ("Yesterday", self.yesterday.as_slice()),
            ("Last 7 days", self.last7_days.as_slice()),
            ("Last 30 days", self.last30_days.as_slice()),
            ("Older", self.older.as_slice()),
        ]
    }

    /// Total number of sessions across all buckets.
    pub fn len(&self) -> usize {
        self.labelled().iter().map(|(_, sessions)| sessions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the session sidebar shows: the newest-first list and the same
/// sessions bucketed by recency.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SessionSidebar {
    pub sorted: Vec<Session>,
    pub groups: SessionGroups,
}
