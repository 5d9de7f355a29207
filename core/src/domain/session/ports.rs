use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, session::entities::SessionContext};

/// Change applied to a stored session while the store is locked.
pub type SessionUpdate = Box<dyn FnOnce(&mut SessionContext) + Send>;

/// Storage for live sessions.
#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    fn create(
        &self,
        session: SessionContext,
    ) -> impl Future<Output = Result<SessionContext, CoreError>> + Send;

    fn get(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<SessionContext>, CoreError>> + Send;

    /// Applies `apply` to the stored session atomically and returns the result.
    fn update(
        &self,
        session_id: Uuid,
        apply: SessionUpdate,
    ) -> impl Future<Output = Result<SessionContext, CoreError>> + Send;

    fn delete(&self, session_id: Uuid) -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// Drops sessions last seen before `cutoff` and returns how many were removed.
    fn purge_expired(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<usize, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionService: Send + Sync {
    fn create_session(&self) -> impl Future<Output = Result<SessionContext, CoreError>> + Send;

    fn get_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionContext, CoreError>> + Send;

    fn end_session(&self, session_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
