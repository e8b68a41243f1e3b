//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues REST calls and `types` defines the shared wire schema.

pub mod api;
pub mod types;
