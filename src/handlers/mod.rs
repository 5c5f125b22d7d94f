// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth, /auth/*) → Protected (access token, /api/*)

pub mod protected;
pub mod public;
