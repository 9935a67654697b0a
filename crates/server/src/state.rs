use std::sync::Arc;

use service::recipes::RecipeRepository;

/// Router state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeRepository>,
}

impl AppState {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }
}
