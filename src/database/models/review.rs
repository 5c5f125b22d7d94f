use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArtifactReview {
    pub visitor_email: String,
    pub username: String,
    pub artifact_id: i64,
    pub artifact_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventReview {
    pub visitor_email: String,
    pub username: String,
    pub event_id: i64,
    pub event_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Everything one visitor has written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorReviews {
    pub artifacts: Vec<ArtifactReview>,
    pub events: Vec<EventReview>,
}
