//! Route-level pages.

pub mod dashboard;
