use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    session::{
        entities::SessionContext,
        ports::{SessionRepository, SessionUpdate},
    },
};

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: SessionContext) -> Result<SessionContext, CoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            tracing::error!(session_id = %session.id, "session id collision");
            return Err(CoreError::InternalServerError);
        }
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<SessionContext>, CoreError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn update(
        &self,
        session_id: Uuid,
        apply: SessionUpdate,
    ) -> Result<SessionContext, CoreError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(&session_id)
            .ok_or_else(|| CoreError::NotFound("session".to_string()))?;
        apply(stored);
        Ok(stored.clone())
    }

    async fn delete(&self, session_id: Uuid) -> Result<bool, CoreError> {
        Ok(self.sessions.write().await.remove(&session_id).is_some())
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, CoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(cutoff));
        Ok(before - sessions.len())
    }
}
