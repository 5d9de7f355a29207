use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    common::{deadline::with_deadline, entities::app_errors::CoreError, services::Service},
    fridge_analysis::ports::LLMClient,
    meal_plan::ports::CalendarGateway,
    recipe::{
        entities::{RecipeCard, RecipeQuery, RecipeSummary, SelectedRecipe},
        parser::parse_recipe_details,
        ports::{ChatCompletionClient, RecipeSearchClient, RecipeService},
        prompts::{CULINARY_SYSTEM_PROMPT, build_recipe_prompt},
        value_objects::{FindRecipesInput, MAX_RESULTS_LIMIT},
    },
    session::ports::SessionRepository,
};

impl<LLM, RS, CC, CG, SR> RecipeService for Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    async fn find_recipes(
        &self,
        session_id: Uuid,
        input: FindRecipesInput,
    ) -> Result<Vec<RecipeSummary>, CoreError> {
        if input.max_results == 0 || input.max_results > MAX_RESULTS_LIMIT {
            return Err(CoreError::Invalid(format!(
                "max results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }

        let session = self.load_session(session_id, Utc::now()).await?;
        let analysis = session
            .analysis
            .as_ref()
            .ok_or_else(|| CoreError::NotFound("fridge analysis".to_string()))?;
        let analysis_id = analysis.id;

        let ingredients = analysis.ingredient_names();
        if ingredients.is_empty() {
            return Err(CoreError::Invalid(
                "no ingredients were detected in the last photo".to_string(),
            ));
        }

        let query = RecipeQuery {
            ingredients,
            max_results: input.max_results,
            offset: input.offset,
        };
        if session.recipe_query.as_ref() == Some(&query) {
            debug!(session_id = %session_id, "reusing recipes from the previous search");
            return Ok(session.recipes);
        }

        let recipes: Vec<RecipeSummary> = with_deadline(
            "recipe search",
            self.timeouts.recipes,
            self.recipe_search.find_by_ingredients(
                query.ingredients.clone(),
                query.max_results,
                query.offset,
            ),
        )
        .await?
        .into_iter()
        .filter(RecipeSummary::is_displayable)
        .collect();

        info!(
            session_id = %session_id,
            ingredients = query.ingredients.len(),
            recipes = recipes.len(),
            "recipes found"
        );

        let found = recipes.clone();
        let stored = self
            .update_session(session_id, move |session| {
                if session.analysis_id() == Some(analysis_id) {
                    session.recipes = found;
                    session.recipe_query = Some(query);
                }
            })
            .await?;
        if stored.analysis_id() != Some(analysis_id) {
            warn!(
                session_id = %session_id,
                "fridge analysis replaced during the recipe search, results not stored"
            );
        }

        Ok(recipes)
    }

    async fn get_recipe_card(
        &self,
        session_id: Uuid,
        recipe_id: i64,
    ) -> Result<RecipeCard, CoreError> {
        let session = self.load_session(session_id, Utc::now()).await?;
        let recipe = session
            .find_recipe(recipe_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("recipe {recipe_id}")))?;

        let text = with_deadline(
            "recipe details generation",
            self.timeouts.generation,
            self.chat_client
                .chat(CULINARY_SYSTEM_PROMPT.to_string(), build_recipe_prompt(&recipe)),
        )
        .await?;

        Ok(RecipeCard::new(recipe, parse_recipe_details(&text)))
    }

    async fn select_recipe(
        &self,
        session_id: Uuid,
        recipe_id: i64,
    ) -> Result<SelectedRecipe, CoreError> {
        let session = self.load_session(session_id, Utc::now()).await?;
        let recipe = session
            .find_recipe(recipe_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("recipe {recipe_id}")))?;
        let analysis_id = session.analysis_id();

        let information = with_deadline(
            "recipe information lookup",
            self.timeouts.recipes,
            self.recipe_search.get_information(recipe_id),
        )
        .await?;

        let selected = SelectedRecipe {
            recipe_id,
            title: recipe.title,
            prep_minutes: information.prep_minutes(),
        };
        let selection = selected.clone();
        let stored = self
            .update_session(session_id, move |session| {
                let same_analysis = session.analysis_id() == analysis_id;
                if same_analysis && session.find_recipe(recipe_id).is_some() {
                    session.selected_recipe = Some(selection);
                    session.chosen_slot = None;
                }
            })
            .await?;
        if stored.selected_recipe.as_ref() != Some(&selected) {
            return Err(CoreError::NotFound(format!("recipe {recipe_id}")));
        }

        info!(
            session_id = %session_id,
            recipe_id,
            prep_minutes = selected.prep_minutes,
            "recipe selected"
        );

        Ok(selected)
    }
}
