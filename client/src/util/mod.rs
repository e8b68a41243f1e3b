//! View-independent helpers.

pub mod user_log;
