//! Port for team persistence.

use async_trait::async_trait;

use crate::domain::{Team, TeamId, TeamPatch, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a team. An unknown host raises
    /// [`RepositoryError::ForeignKeyViolation`]; a taken name raises
    /// [`RepositoryError::UniqueViolation`].
    async fn create(&self, team: &Team) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError>;

    async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, RepositoryError>;

    /// Teams hosted by `host_id`.
    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<Team>, RepositoryError>;

    async fn update(
        &self,
        id: &TeamId,
        patch: &TeamPatch,
    ) -> Result<Option<Team>, RepositoryError>;

    async fn delete(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError>;
}
