use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{RecipeInformation, RecipeIngredient, RecipeSummary},
        ports::RecipeSearchClient,
        value_objects::MAX_RESULTS_LIMIT,
    },
};

const SERVICE: &str = "spoonacular";

#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoundRecipe {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    used_ingredient_count: u32,
    #[serde(default)]
    missed_ingredient_count: u32,
    #[serde(default)]
    used_ingredients: Vec<FoundIngredient>,
    #[serde(default)]
    missed_ingredients: Vec<FoundIngredient>,
    #[serde(default)]
    likes: i64,
}

#[derive(Debug, Deserialize)]
struct FoundIngredient {
    #[serde(default)]
    name: String,
    #[serde(default)]
    original: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Information {
    id: i64,
    #[serde(default)]
    title: String,
    ready_in_minutes: Option<i64>,
    servings: Option<i64>,
    price_per_serving: Option<f64>,
    #[serde(default)]
    diets: Vec<String>,
    #[serde(default)]
    cuisines: Vec<String>,
    source_url: Option<String>,
}

impl From<FoundIngredient> for RecipeIngredient {
    fn from(ingredient: FoundIngredient) -> Self {
        Self {
            name: ingredient.name,
            original: ingredient.original,
            amount: ingredient.amount,
            unit: ingredient.unit,
        }
    }
}

impl From<FoundRecipe> for RecipeSummary {
    fn from(recipe: FoundRecipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            image_url: recipe.image.unwrap_or_default(),
            used_ingredients: recipe.used_ingredients.into_iter().map(Into::into).collect(),
            missed_ingredients: recipe
                .missed_ingredients
                .into_iter()
                .map(Into::into)
                .collect(),
            used_ingredient_count: recipe.used_ingredient_count,
            missed_ingredient_count: recipe.missed_ingredient_count,
            likes: recipe.likes,
        }
    }
}

impl From<Information> for RecipeInformation {
    fn from(information: Information) -> Self {
        Self {
            id: information.id,
            title: information.title,
            ready_in_minutes: information.ready_in_minutes,
            servings: information.servings,
            price_per_serving: information.price_per_serving,
            diets: information.diets,
            cuisines: information.cuisines,
            source_url: information.source_url,
        }
    }
}

impl SpoonacularClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn get<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, CoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Spoonacular request failed: {}", e);
                CoreError::upstream(SERVICE, format!("request failed: {e}"))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound(format!("recipe at {path}")));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Spoonacular API error: {} - {}", status, error_text);
            return Err(CoreError::upstream(
                SERVICE,
                format!("returned {status}: {error_text}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse Spoonacular response: {}", e);
            CoreError::upstream(SERVICE, format!("unreadable response: {e}"))
        })
    }
}

impl RecipeSearchClient for SpoonacularClient {
    async fn find_by_ingredients(
        &self,
        ingredients: Vec<String>,
        max_results: u32,
        offset: u32,
    ) -> Result<Vec<RecipeSummary>, CoreError> {
        // The endpoint has no offset parameter: fetch the leading pages too and skip them.
        let number = offset.saturating_add(max_results).min(MAX_RESULTS_LIMIT);
        if number <= offset {
            return Ok(Vec::new());
        }

        let params = [
            ("ingredients", ingredients.join(",")),
            ("number", number.to_string()),
            ("ranking", "2".to_string()),
            ("ignorePantry", "true".to_string()),
        ];
        let found: Vec<FoundRecipe> = self.get("/recipes/findByIngredients", &params).await?;

        Ok(found
            .into_iter()
            .skip(offset as usize)
            .take(max_results as usize)
            .map(Into::into)
            .collect())
    }

    async fn get_information(&self, recipe_id: i64) -> Result<RecipeInformation, CoreError> {
        let params = [("includeNutrition", "false".to_string())];
        let information: Information = self
            .get(&format!("/recipes/{recipe_id}/information"), &params)
            .await
            .map_err(|e| match e {
                CoreError::NotFound(_) => CoreError::NotFound(format!("recipe {recipe_id}")),
                other => other,
            })?;

        Ok(information.into())
    }
}
