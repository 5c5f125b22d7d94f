pub mod database;
pub mod password;
