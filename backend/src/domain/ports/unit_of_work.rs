//! Transactional seam used by the association service.
//!
//! A [`UnitOfWork`] owns one connection with an open transaction. Reads made
//! through it observe the transaction's own writes. Dropping a unit without
//! calling [`UnitOfWork::commit`] abandons its writes.

use async_trait::async_trait;

use crate::domain::{EventId, Link, LinkId, PassId, TeamId, UserId};

use super::RepositoryError;

/// Reads needed to decide whether users and teams may join events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EligibilityReader: Send {
    /// Passes linked to `event_id`. Empty when the event is unrestricted or
    /// does not exist.
    async fn event_pass_ids(&mut self, event_id: &EventId)
    -> Result<Vec<PassId>, RepositoryError>;

    /// Pass held by `user_id`, if the user exists and holds one.
    async fn user_pass_id(&mut self, user_id: &UserId) -> Result<Option<PassId>, RepositoryError>;

    /// Host of `team_id`, if the team exists and has one.
    async fn team_host_id(&mut self, team_id: &TeamId) -> Result<Option<UserId>, RepositoryError>;

    /// Members of `team_id` through Team–User links.
    async fn team_member_ids(&mut self, team_id: &TeamId)
    -> Result<Vec<UserId>, RepositoryError>;

    /// Events `team_id` is registered for through Team–Event links.
    async fn team_event_ids(&mut self, team_id: &TeamId)
    -> Result<Vec<EventId>, RepositoryError>;
}

/// One open transaction.
#[async_trait]
pub trait UnitOfWork: EligibilityReader {
    /// Insert `link` under `id`.
    async fn insert_link(&mut self, link: &Link, id: &LinkId) -> Result<(), RepositoryError>;

    /// Remove `link`, returning the removed row's identifier.
    async fn delete_link(&mut self, link: &Link) -> Result<Option<LinkId>, RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Hands out fresh units of work.
#[async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError>;
}
