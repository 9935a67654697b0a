use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::recipes::domain::{Recipe, RecipeInput, RecipeReplace};

/// Trait abstraction over the recipe collection (list/create/replace/delete).
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn list(&self) -> Vec<Recipe>;
    async fn get(&self, id: Uuid) -> Option<Recipe>;
    async fn create(&self, input: RecipeInput) -> Result<Recipe, ServiceError>;
    async fn replace(&self, id: Uuid, input: RecipeReplace) -> Result<Recipe, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<Recipe, ServiceError>;
}
