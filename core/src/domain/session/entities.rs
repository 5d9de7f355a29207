use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_uuid_v7,
    fridge_analysis::entities::{AnalysisImage, FridgeAnalysis},
    meal_plan::entities::ScheduledMealPrep,
    recipe::entities::{RecipeQuery, RecipeSummary, SelectedRecipe},
};

/// Per-user interactive context, one per browser session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionContext {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub analysis: Option<FridgeAnalysis>,
    #[serde(skip)]
    pub analysis_image: Option<AnalysisImage>,
    pub recipes: Vec<RecipeSummary>,
    pub recipe_query: Option<RecipeQuery>,
    pub selected_recipe: Option<SelectedRecipe>,
    pub chosen_slot: Option<ScheduledMealPrep>,
}

impl SessionContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: generate_uuid_v7(),
            created_at: now,
            last_seen_at: now,
            analysis: None,
            analysis_image: None,
            recipes: Vec::new(),
            recipe_query: None,
            selected_recipe: None,
            chosen_slot: None,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_seen_at {
            self.last_seen_at = now;
        }
    }

    pub fn analysis_id(&self) -> Option<Uuid> {
        self.analysis.as_ref().map(|analysis| analysis.id)
    }

    /// Idle sessions last seen before `cutoff` are expired.
    pub fn is_expired(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_seen_at < cutoff
    }

    /// A new analysis invalidates everything derived from the previous one.
    pub fn replace_analysis(&mut self, analysis: FridgeAnalysis, image: Option<AnalysisImage>) {
        self.analysis = Some(analysis);
        self.analysis_image = image;
        self.recipes.clear();
        self.recipe_query = None;
        self.selected_recipe = None;
        self.chosen_slot = None;
    }

    pub fn find_recipe(&self, recipe_id: i64) -> Option<&RecipeSummary> {
        self.recipes.iter().find(|recipe| recipe.id == recipe_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Duration;

    use super::*;
    use crate::domain::recipe::entities::RecipeSummary;

    fn analysis() -> FridgeAnalysis {
        FridgeAnalysis {
            id: Uuid::new_v4(),
            summary: "mostly vegetables".to_string(),
            items: BTreeMap::new(),
            image_width: 800,
            image_height: 600,
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_replace_analysis_clears_derived_state() {
        let mut session = SessionContext::new(Utc::now());
        session.recipes.push(RecipeSummary {
            id: 7,
            title: "Omelette".to_string(),
            image_url: "https://img.example/7.jpg".to_string(),
            used_ingredients: Vec::new(),
            missed_ingredients: Vec::new(),
            used_ingredient_count: 1,
            missed_ingredient_count: 0,
            likes: 3,
        });
        session.recipe_query = Some(RecipeQuery {
            ingredients: vec!["egg".to_string()],
            max_results: 5,
            offset: 0,
        });
        session.selected_recipe = Some(SelectedRecipe {
            recipe_id: 7,
            title: "Omelette".to_string(),
            prep_minutes: 10,
        });

        session.analysis_image = Some(AnalysisImage {
            analysis_id: Uuid::new_v4(),
            jpeg: vec![0xFF, 0xD8],
        });

        session.replace_analysis(analysis(), None);

        assert!(session.analysis.is_some());
        assert!(session.analysis_image.is_none());
        assert!(session.recipes.is_empty());
        assert!(session.recipe_query.is_none());
        assert!(session.selected_recipe.is_none());
        assert!(session.find_recipe(7).is_none());
    }

    #[test]
    fn test_expiry_uses_last_seen() {
        let start = Utc::now();
        let mut session = SessionContext::new(start);

        let ttl = Duration::minutes(120);

        assert!(!session.is_expired(start + Duration::minutes(120) - ttl));
        assert!(session.is_expired(start + Duration::minutes(121) - ttl));

        session.touch(start + Duration::minutes(100));
        assert!(!session.is_expired(start + Duration::minutes(121) - ttl));
    }
}
