use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::Keyed;

/// A named list of ingredients. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Keyed for Recipe {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

/// Create payload. Fields are optional at the wire level so a missing
/// `name` surfaces as a validation error instead of a parse failure.
/// Unknown fields such as `checked` are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RecipeInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

/// Replace payload: a full record. `id`, when present, must match the path.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RecipeReplace {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

/// The mutable part of a recipe, after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl RecipeFields {
    fn from_parts(name: Option<String>, ingredients: Option<Vec<String>>) -> Result<Self, ServiceError> {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            Some(_) => return Err(ServiceError::Validation("`name` must not be blank".into())),
            None => return Err(ServiceError::Validation("missing `name` in request body".into())),
        };
        Ok(Self { name, ingredients: ingredients.unwrap_or_default() })
    }

    pub fn into_recipe(self, id: Uuid) -> Recipe {
        Recipe { id, name: self.name, ingredients: self.ingredients }
    }

    pub fn apply_to(self, recipe: &mut Recipe) {
        recipe.name = self.name;
        recipe.ingredients = self.ingredients;
    }
}

impl RecipeInput {
    pub fn new(name: impl Into<String>, ingredients: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            ingredients: Some(ingredients.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn validate(self) -> Result<RecipeFields, ServiceError> {
        RecipeFields::from_parts(self.name, self.ingredients)
    }
}

impl RecipeReplace {
    pub fn validate(self, path_id: Uuid) -> Result<RecipeFields, ServiceError> {
        if let Some(body_id) = self.id {
            if body_id != path_id {
                return Err(ServiceError::Validation(format!(
                    "request path id ({path_id}) and request body id ({body_id}) must match"
                )));
            }
        }
        RecipeFields::from_parts(self.name, self.ingredients)
    }
}

impl From<RecipeInput> for RecipeReplace {
    fn from(input: RecipeInput) -> Self {
        Self { id: None, name: input.name, ingredients: input.ingredients }
    }
}
