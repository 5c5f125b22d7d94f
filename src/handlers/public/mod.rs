// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Route Prefix: /auth/*
// Middleware: none

pub mod auth;
