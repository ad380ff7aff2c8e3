//! Persistent generation-session records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::SessionId;
use crate::profile::{Constraints, InputProfile};

/// Position where the next run of a session resumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cursor {
    /// Index of the rule the next run starts from.
    #[serde(rename = "current_rule_index")]
    pub rule_index: usize,
    /// Number of filtered candidates of that rule already written.
    #[serde(rename = "current_rule_password_count")]
    pub count_within_rule: usize,
}

impl Cursor {
    pub fn new(rule_index: usize, count_within_rule: usize) -> Self {
        Self {
            rule_index,
            count_within_rule,
        }
    }
}

/// Lifecycle state of a session relative to a rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    New,
    InProgress,
    Completed,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// One stored generation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 timestamp of the last store update.
    #[serde(default)]
    pub updated_at: String,
    #[serde(flatten)]
    pub profile: InputProfile,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(flatten)]
    pub cursor: Cursor,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub total_generated: u64,
    /// Output artifact names produced by past runs, oldest first.
    #[serde(default)]
    pub last_run_files: Vec<String>,
}

impl SessionRecord {
    pub fn new(session_id: SessionId, profile: InputProfile, constraints: Constraints) -> Self {
        let now = now_timestamp();
        Self {
            session_id,
            created_at: now.clone(),
            updated_at: now,
            profile,
            constraints,
            cursor: Cursor::default(),
            is_completed: false,
            total_generated: 0,
            last_run_files: Vec::new(),
        }
    }

    /// Update the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_timestamp();
    }

    pub fn is_ephemeral(&self) -> bool {
        self.session_id.is_ephemeral()
    }

    /// Derive the lifecycle state against a rule list of `total_rules` entries.
    ///
    /// Only the cursor decides completion; `is_completed` mirrors it for display.
    pub fn state(&self, total_rules: usize) -> SessionState {
        if self.cursor.rule_index >= total_rules {
            SessionState::Completed
        } else if self.cursor == Cursor::default() && self.total_generated == 0 {
            SessionState::New
        } else {
            SessionState::InProgress
        }
    }

    /// Parse the created_at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Parse the updated_at timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Current UTC time as RFC 3339 with second precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
