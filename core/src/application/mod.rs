use tracing::info;

use crate::{
    domain::common::{FoodeaseConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        calendar::google_calendar::GoogleCalendarGateway,
        llm::{gemini_client::GeminiLLMClient, groq_client::GroqChatClient},
        recipe::spoonacular_client::SpoonacularClient,
        session::in_memory_repository::InMemorySessionRepository,
    },
};

pub type FoodeaseService = Service<
    GeminiLLMClient,
    SpoonacularClient,
    GroqChatClient,
    GoogleCalendarGateway,
    InMemorySessionRepository,
>;

/// Builds the service with the hosted adapters. Fails on incomplete configuration.
pub fn create_service(config: FoodeaseConfig) -> Result<FoodeaseService, CoreError> {
    config.validate()?;

    let llm_client = GeminiLLMClient::new(
        config.llm.gemini_api_key,
        config.llm.gemini_model.clone(),
        config.llm.gemini_base_url,
    );
    let recipe_search = SpoonacularClient::new(
        config.recipes.spoonacular_api_key,
        config.recipes.spoonacular_base_url,
    );
    let chat_client = GroqChatClient::new(
        config.recipes.groq_api_key,
        config.recipes.groq_model.clone(),
        config.recipes.groq_base_url,
    );
    let calendar_gateway = GoogleCalendarGateway::new(config.calendar);

    info!(
        gemini_model = %config.llm.gemini_model,
        groq_model = %config.recipes.groq_model,
        session_ttl_minutes = config.session.ttl_minutes,
        "foodease service created"
    );

    Ok(Service::new(
        llm_client,
        recipe_search,
        chat_client,
        calendar_gateway,
        InMemorySessionRepository::new(),
        config.scheduling,
        config.timeouts,
        config.session,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::test_support::config;

    #[test]
    fn test_create_service_with_complete_config() {
        assert!(create_service(config()).is_ok());
    }

    #[test]
    fn test_create_service_rejects_missing_keys() {
        let mut config = config();
        config.recipes.groq_api_key = String::new();

        assert!(matches!(
            create_service(config),
            Err(CoreError::Configuration(_))
        ));
    }
}
