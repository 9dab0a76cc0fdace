//! Port for pass persistence.

use async_trait::async_trait;

use crate::domain::{Pass, PassId, PassPatch};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassRepository: Send + Sync {
    async fn create(&self, pass: &Pass) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &PassId) -> Result<Option<Pass>, RepositoryError>;

    async fn find_by_ids(&self, ids: &[PassId]) -> Result<Vec<Pass>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Pass>, RepositoryError>;

    async fn update(
        &self,
        id: &PassId,
        patch: &PassPatch,
    ) -> Result<Option<Pass>, RepositoryError>;

    /// Remove a pass. Holders keep their account with no pass.
    async fn delete(&self, id: &PassId) -> Result<Option<Pass>, RepositoryError>;
}
