//! Service layer for the recipe book.
//! - Domain types and validation live in `recipes`.
//! - `storage` holds the ordered, optionally file-backed record store.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod recipes;
pub mod storage;
