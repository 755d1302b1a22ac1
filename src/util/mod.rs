//! Shared utilities

pub mod rate_limit;
