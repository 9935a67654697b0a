use crate::recipes::domain::RecipeInput;

/// Recipes a fresh store starts with when seeding is enabled.
pub fn default_recipes() -> Vec<RecipeInput> {
    vec![
        RecipeInput::new("boiled white rice", &["1 cup white rice", "2 cups water", "pinch of salt"]),
        RecipeInput::new("milkshake", &["2 tbsp cocoa", "2 cups vanilla ice cream", "1 cup milk"]),
    ]
}
