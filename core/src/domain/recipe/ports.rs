use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{RecipeCard, RecipeInformation, RecipeSummary, SelectedRecipe},
        value_objects::FindRecipesInput,
    },
};

/// Third-party recipe database.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeSearchClient: Send + Sync {
    /// Recipes ranked by how few ingredients are missing, skipping the first `offset`.
    fn find_by_ingredients(
        &self,
        ingredients: Vec<String>,
        max_results: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, CoreError>> + Send;

    fn get_information(
        &self,
        recipe_id: i64,
    ) -> impl Future<Output = Result<RecipeInformation, CoreError>> + Send;
}

/// Chat-completion language model used to write recipe details.
#[cfg_attr(test, mockall::automock)]
pub trait ChatCompletionClient: Send + Sync {
    fn chat(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    fn find_recipes(
        &self,
        session_id: Uuid,
        input: FindRecipesInput,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, CoreError>> + Send;

    fn get_recipe_card(
        &self,
        session_id: Uuid,
        recipe_id: i64,
    ) -> impl Future<Output = Result<RecipeCard, CoreError>> + Send;

    fn select_recipe(
        &self,
        session_id: Uuid,
        recipe_id: i64,
    ) -> impl Future<Output = Result<SelectedRecipe, CoreError>> + Send;
}
