use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewArtist {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct ArtistUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl ArtistUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.middle_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.date_of_death.is_none()
    }

    pub fn apply(&self, artist: &mut Artist) {
        if let Some(v) = &self.first_name {
            artist.first_name = v.clone();
        }
        if let Some(v) = &self.middle_name {
            artist.middle_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            artist.last_name = v.clone();
        }
        if let Some(v) = self.date_of_birth {
            artist.date_of_birth = Some(v);
        }
        if let Some(v) = self.date_of_death {
            artist.date_of_death = Some(v);
        }
    }
}
