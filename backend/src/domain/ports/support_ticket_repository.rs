//! Port for support ticket persistence.

use async_trait::async_trait;

use crate::domain::{SupportTicket, SupportTicketId, SupportTicketPatch};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupportTicketRepository: Send + Sync {
    async fn create(&self, ticket: &SupportTicket) -> Result<(), RepositoryError>;

    async fn find_by_id(
        &self,
        id: &SupportTicketId,
    ) -> Result<Option<SupportTicket>, RepositoryError>;

    /// Merge `patch`, including any resolution it carries.
    async fn update(
        &self,
        id: &SupportTicketId,
        patch: &SupportTicketPatch,
    ) -> Result<Option<SupportTicket>, RepositoryError>;

    async fn delete(
        &self,
        id: &SupportTicketId,
    ) -> Result<Option<SupportTicket>, RepositoryError>;
}
