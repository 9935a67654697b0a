use service::recipes::{Recipe, RecipeInput, RecipeReplace};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::recipes::list_recipes,
        crate::routes::recipes::get_recipe,
        crate::routes::recipes::create_recipe,
        crate::routes::recipes::replace_recipe,
        crate::routes::recipes::delete_recipe,
    ),
    components(
        schemas(
            HealthResponse,
            Recipe,
            RecipeInput,
            RecipeReplace,
        )
    ),
    tags(
        (name = "health"),
        (name = "recipes")
    )
)]
pub struct ApiDoc;
