use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A museum, keyed by its physical address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Museum {
    pub address: String,
    pub name: String,
}
