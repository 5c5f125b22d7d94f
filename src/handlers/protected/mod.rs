// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware injects AuthUser; role checks happen per handler

pub mod account;
pub mod artifacts;
pub mod artists;
pub mod auth;
pub mod edit_logs;
pub mod events;
pub mod exhibits;
pub mod museums;
pub mod reviews;
pub mod staff;
pub mod utils;
