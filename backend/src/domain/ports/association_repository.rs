//! Read-only queries over association links.
//!
//! Writes go through [`super::UnitOfWork`] so they can be validated in the
//! same transaction.

use async_trait::async_trait;

use crate::domain::{EventId, PassId, TeamId, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssociationRepository: Send + Sync {
    async fn pass_event_ids(&self, pass_id: &PassId) -> Result<Vec<EventId>, RepositoryError>;

    async fn event_pass_ids(&self, event_id: &EventId) -> Result<Vec<PassId>, RepositoryError>;

    async fn user_team_ids(&self, user_id: &UserId) -> Result<Vec<TeamId>, RepositoryError>;

    async fn user_event_ids(&self, user_id: &UserId) -> Result<Vec<EventId>, RepositoryError>;

    async fn team_user_ids(&self, team_id: &TeamId) -> Result<Vec<UserId>, RepositoryError>;

    async fn team_event_ids(&self, team_id: &TeamId) -> Result<Vec<EventId>, RepositoryError>;

    async fn event_team_ids(&self, event_id: &EventId) -> Result<Vec<TeamId>, RepositoryError>;

    async fn event_user_ids(&self, event_id: &EventId) -> Result<Vec<UserId>, RepositoryError>;
}
