//! Recipe book: domain types, the store that owns the collection, and the
//! repository seam the HTTP layer talks to.

pub mod domain;
pub mod repository;
pub mod seed;
pub mod store;

pub use domain::{Recipe, RecipeFields, RecipeInput, RecipeReplace};
pub use repository::RecipeRepository;
pub use store::RecipeStore;
