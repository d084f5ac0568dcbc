//! Search orchestrator: concurrent engine queries and exact-URL merging.
//!
//! This module fans a single query out to every configured engine
//! concurrently, merges the per-engine URL lists in configured engine
//! order, drops exact duplicates, and truncates to the requested limit.

pub mod dedup;
pub mod search;
