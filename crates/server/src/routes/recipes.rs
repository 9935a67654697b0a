use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use service::recipes::{Recipe, RecipeInput, RecipeReplace};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// List every recipe in insertion order.
#[utoipa::path(
    get, path = "/recipes", tag = "recipes",
    responses((status = 200, description = "All recipes in insertion order", body = [Recipe]))
)]
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    let list = state.recipes.list().await;
    debug!(count = list.len(), "list recipes");
    Json(list)
}

/// Fetch one recipe by id.
#[utoipa::path(
    get, path = "/recipes/{id}", tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Recipe>, JsonApiError> {
    let Path(id) = id?;
    state
        .recipes
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("recipe not found"))
}

/// Create a recipe; the store assigns its id.
#[utoipa::path(
    post, path = "/recipes", tag = "recipes",
    request_body = RecipeInput,
    responses(
        (status = 201, description = "Created", body = Recipe),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.recipes.create(input).await.map_err(|e| {
        warn!(err = %e, "create recipe rejected");
        JsonApiError::from(e)
    })?;
    info!(recipe_id = %created.id, name = %created.name, "recipe created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace name and ingredients of an existing recipe.
#[utoipa::path(
    put, path = "/recipes/{id}", tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe id")),
    request_body = RecipeReplace,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn replace_recipe(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RecipeReplace>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    state.recipes.replace(id, input).await.map_err(|e| {
        warn!(recipe_id = %id, err = %e, "replace recipe failed");
        JsonApiError::from(e)
    })?;
    info!(recipe_id = %id, "recipe replaced");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a recipe by id.
#[utoipa::path(
    delete, path = "/recipes/{id}", tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.recipes.delete(id).await.map_err(|e| {
        warn!(recipe_id = %id, err = %e, "delete recipe failed");
        JsonApiError::from(e)
    })?;
    info!(recipe_id = %id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
