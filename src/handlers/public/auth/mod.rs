// handlers/public/auth/mod.rs - Token acquisition and account registration

pub mod login;
pub mod refresh;
pub mod register;

pub use login::{login_staff, login_visitor};
pub use refresh::refresh_post;
pub use register::register_post;
