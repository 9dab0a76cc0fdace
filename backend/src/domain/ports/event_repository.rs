//! Port for event persistence.

use async_trait::async_trait;

use crate::domain::{Event, EventId, EventPatch, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, RepositoryError>;

    async fn find_by_ids(&self, ids: &[EventId]) -> Result<Vec<Event>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Event>, RepositoryError>;

    /// Events whose organiser is `organizer_id`.
    async fn find_by_organizer(
        &self,
        organizer_id: &UserId,
    ) -> Result<Vec<Event>, RepositoryError>;

    async fn update(
        &self,
        id: &EventId,
        patch: &EventPatch,
    ) -> Result<Option<Event>, RepositoryError>;

    async fn delete(&self, id: &EventId) -> Result<Option<Event>, RepositoryError>;
}
