use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    fridge_analysis::ports::LLMClient,
    meal_plan::ports::CalendarGateway,
    recipe::ports::{ChatCompletionClient, RecipeSearchClient},
    session::{
        entities::SessionContext,
        ports::{SessionRepository, SessionService},
    },
};

impl<LLM, RS, CC, CG, SR> SessionService for Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    async fn create_session(&self) -> Result<SessionContext, CoreError> {
        let now = Utc::now();
        self.session_repository
            .purge_expired(self.session_cutoff(now))
            .await?;

        let session = self
            .session_repository
            .create(SessionContext::new(now))
            .await?;

        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<SessionContext, CoreError> {
        self.load_session(session_id, Utc::now()).await
    }

    async fn end_session(&self, session_id: Uuid) -> Result<(), CoreError> {
        if !self.session_repository.delete(session_id).await? {
            return Err(CoreError::NotFound("session".to_string()));
        }

        info!(session_id = %session_id, "session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::services::test_support::Mocks;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let service = Mocks::default().into_service();

        let created = service.create_session().await.unwrap();
        let fetched = service.get_session(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert!(fetched.analysis.is_none());

        service.end_session(created.id).await.unwrap();

        assert_eq!(
            service.get_session(created.id).await,
            Err(CoreError::NotFound("session".to_string()))
        );
        assert_eq!(
            service.end_session(created.id).await,
            Err(CoreError::NotFound("session".to_string()))
        );
    }
}
