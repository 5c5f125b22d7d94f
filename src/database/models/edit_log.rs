use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EditLog {
    pub id: i64,
    pub editor_email: String,
    pub supervisor_email: String,
    pub target_kind: String,
    pub target_id: i64,
    pub action: String,
    pub edited_at: DateTime<Utc>,
}

/// Who made a staff edit and which supervisor it is reported to.
/// Supervisors editing their own catalog report to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStamp {
    pub editor_email: String,
    pub supervisor_email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Exhibit,
    Artifact,
    Event,
}

impl EditTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditTarget::Exhibit => "exhibit",
            EditTarget::Artifact => "artifact",
            EditTarget::Event => "event",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Update,
    Delete,
}

impl EditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Update => "update",
            EditAction::Delete => "delete",
        }
    }
}
