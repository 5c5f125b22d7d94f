use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Exhibit {
    pub id: i64,
    pub name: String,
    pub museum_address: String,
}

#[derive(Debug, Clone)]
pub struct NewExhibit {
    pub name: String,
    pub museum_address: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExhibitUpdate {
    pub name: Option<String>,
}
