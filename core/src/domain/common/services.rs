use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    common::{SchedulingConfig, SessionConfig, TimeoutConfig, entities::app_errors::CoreError},
    fridge_analysis::ports::LLMClient,
    meal_plan::ports::CalendarGateway,
    recipe::ports::{ChatCompletionClient, RecipeSearchClient},
    session::{entities::SessionContext, ports::SessionRepository},
};

/// Aggregates every outbound port; domain services are implemented on it.
pub struct Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) recipe_search: Arc<RS>,
    pub(crate) chat_client: Arc<CC>,
    pub(crate) calendar_gateway: Arc<CG>,
    pub(crate) session_repository: Arc<SR>,
    pub(crate) scheduling: SchedulingConfig,
    pub(crate) timeouts: TimeoutConfig,
    pub(crate) session: SessionConfig,
}

impl<LLM, RS, CC, CG, SR> Clone for Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: self.llm_client.clone(),
            recipe_search: self.recipe_search.clone(),
            chat_client: self.chat_client.clone(),
            calendar_gateway: self.calendar_gateway.clone(),
            session_repository: self.session_repository.clone(),
            scheduling: self.scheduling.clone(),
            timeouts: self.timeouts.clone(),
            session: self.session.clone(),
        }
    }
}

impl<LLM, RS, CC, CG, SR> Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        llm_client: LLM,
        recipe_search: RS,
        chat_client: CC,
        calendar_gateway: CG,
        session_repository: SR,
        scheduling: SchedulingConfig,
        timeouts: TimeoutConfig,
        session: SessionConfig,
    ) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            recipe_search: Arc::new(recipe_search),
            chat_client: Arc::new(chat_client),
            calendar_gateway: Arc::new(calendar_gateway),
            session_repository: Arc::new(session_repository),
            scheduling,
            timeouts,
            session,
        }
    }

    pub(crate) fn session_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::minutes(self.session.ttl_minutes)
    }

    /// Fetches a live session and marks it as seen at `now`.
    pub(crate) async fn load_session(
        &self,
        session_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SessionContext, CoreError> {
        let purged = self
            .session_repository
            .purge_expired(self.session_cutoff(now))
            .await?;
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }

        self.update_session(session_id, move |session| session.touch(now))
            .await
    }

    /// Applies `apply` to the stored session without overwriting concurrent changes.
    pub(crate) async fn update_session<F>(
        &self,
        session_id: Uuid,
        apply: F,
    ) -> Result<SessionContext, CoreError>
    where
        F: FnOnce(&mut SessionContext) + Send + 'static,
    {
        self.session_repository
            .update(session_id, Box::new(apply))
            .await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::{
        domain::{
            common::test_support::config, fridge_analysis::ports::MockLLMClient,
            meal_plan::ports::MockCalendarGateway,
            recipe::ports::{MockChatCompletionClient, MockRecipeSearchClient},
        },
        infrastructure::session::in_memory_repository::InMemorySessionRepository,
    };

    pub type TestService = Service<
        MockLLMClient,
        MockRecipeSearchClient,
        MockChatCompletionClient,
        MockCalendarGateway,
        InMemorySessionRepository,
    >;

    pub struct Mocks {
        pub llm: MockLLMClient,
        pub search: MockRecipeSearchClient,
        pub chat: MockChatCompletionClient,
        pub calendar: MockCalendarGateway,
    }

    impl Default for Mocks {
        fn default() -> Self {
            Self {
                llm: MockLLMClient::new(),
                search: MockRecipeSearchClient::new(),
                chat: MockChatCompletionClient::new(),
                calendar: MockCalendarGateway::new(),
            }
        }
    }

    impl Mocks {
        pub fn into_service(self) -> TestService {
            let config = config();
            Service::new(
                self.llm,
                self.search,
                self.chat,
                self.calendar,
                InMemorySessionRepository::new(),
                config.scheduling,
                config.timeouts,
                config.session,
            )
        }
    }

    /// Stores `session` directly, bypassing the session service.
    pub async fn seed(service: &TestService, session: SessionContext) -> Uuid {
        let id = session.id;
        service
            .session_repository
            .create(session)
            .await
            .unwrap();
        id
    }
}
