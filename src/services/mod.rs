//! Domain services behind the HTTP routes.

pub mod coin;
pub mod user;
