use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe::value_objects::DEFAULT_PREP_MINUTES;

pub const NOT_FOUND: &str = "Not Found";
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredient {
    pub name: String,
    pub original: String,
    pub amount: f64,
    pub unit: String,
}

/// A recipe returned by the ingredient search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub used_ingredients: Vec<RecipeIngredient>,
    pub missed_ingredients: Vec<RecipeIngredient>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub likes: i64,
}

impl RecipeSummary {
    pub fn is_displayable(&self) -> bool {
        !self.title.trim().is_empty() && !self.image_url.trim().is_empty()
    }

    pub fn used_ingredient_names(&self) -> String {
        join_names(&self.used_ingredients)
    }

    pub fn missed_ingredient_names(&self) -> String {
        join_names(&self.missed_ingredients)
    }
}

fn join_names(ingredients: &[RecipeIngredient]) -> String {
    ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeInformation {
    pub id: i64,
    pub title: String,
    pub ready_in_minutes: Option<i64>,
    pub servings: Option<i64>,
    pub price_per_serving: Option<f64>,
    pub diets: Vec<String>,
    pub cuisines: Vec<String>,
    pub source_url: Option<String>,
}

impl RecipeInformation {
    /// Preparation time used for meal-prep slots.
    pub fn prep_minutes(&self) -> i64 {
        match self.ready_in_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_PREP_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KeyInformation {
    pub calories: String,
    pub cooking_time: String,
    pub price: String,
    pub dietary: String,
    pub cuisine: String,
    pub difficulty: String,
}

impl Default for KeyInformation {
    fn default() -> Self {
        Self {
            calories: NOT_FOUND.to_string(),
            cooking_time: NOT_FOUND.to_string(),
            price: NOT_FOUND.to_string(),
            dietary: NOT_FOUND.to_string(),
            cuisine: NOT_FOUND.to_string(),
            difficulty: NOT_FOUND.to_string(),
        }
    }
}

/// Generated recipe text split into its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetails {
    pub key_information: KeyInformation,
    pub description: String,
    pub instructions: Vec<String>,
    pub additional_information: Option<String>,
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeCard {
    pub recipe: RecipeSummary,
    pub details: RecipeDetails,
    pub used_ingredients: String,
    pub missed_ingredients: String,
}

impl RecipeCard {
    pub fn new(recipe: RecipeSummary, details: RecipeDetails) -> Self {
        Self {
            used_ingredients: recipe.used_ingredient_names(),
            missed_ingredients: recipe.missed_ingredient_names(),
            recipe,
            details,
        }
    }
}

/// Parameters of the last recipe search, used to reuse its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeQuery {
    pub ingredients: Vec<String>,
    pub max_results: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectedRecipe {
    pub recipe_id: i64,
    pub title: String,
    pub prep_minutes: i64,
}
