use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_DISPLAY_STATUS: &str = "On Display";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Artifact {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub year_made: Option<i32>,
    pub creators: Option<String>,
    pub display_status: String,
    pub exhibit_id: i64,
}

/// Artifact joined with the exhibit and museum that hold it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArtifactDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub artifact: Artifact,
    pub exhibit_name: String,
    pub museum_name: String,
    pub museum_address: String,
}

#[derive(Debug, Clone)]
pub struct NewArtifact {
    pub name: String,
    pub description: String,
    pub year_made: Option<i32>,
    pub creators: Option<String>,
    pub display_status: Option<String>,
    pub exhibit_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ArtifactUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year_made: Option<i32>,
    pub creators: Option<String>,
    pub display_status: Option<String>,
    pub exhibit_id: Option<i64>,
}

impl ArtifactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.year_made.is_none()
            && self.creators.is_none()
            && self.display_status.is_none()
            && self.exhibit_id.is_none()
    }

    pub fn apply(&self, artifact: &mut Artifact) {
        if let Some(v) = &self.name {
            artifact.name = v.clone();
        }
        if let Some(v) = &self.description {
            artifact.description = v.clone();
        }
        if let Some(v) = self.year_made {
            artifact.year_made = Some(v);
        }
        if let Some(v) = &self.creators {
            artifact.creators = Some(v.clone());
        }
        if let Some(v) = &self.display_status {
            artifact.display_status = v.clone();
        }
        if let Some(v) = self.exhibit_id {
            artifact.exhibit_id = v;
        }
    }
}
