use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Exhibit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub museum_address: String,
}

/// Event with the exhibits that take part in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub exhibits: Vec<Exhibit>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub museum_address: String,
}

#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn apply(&self, event: &mut Event) {
        if let Some(v) = &self.name {
            event.name = v.clone();
        }
        if let Some(v) = self.start_date {
            event.start_date = v;
        }
        if let Some(v) = self.end_date {
            event.end_date = v;
        }
    }
}
