//! Storage abstractions for service layer
//!
//! Holds the ordered record store used by the recipe service, optionally
//! persisted as a JSON array on disk.

pub mod json_list_store;

pub use json_list_store::{JsonListStore, Keyed};
