//! Read-only queries over the association tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssociationRepository, RepositoryError};
use crate::domain::{EventId, PassId, TeamId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::parse_ids;
use super::pool::DbPool;
use super::schema::{pass_events, team_events, team_users, user_events};

/// Diesel-backed implementation of the `AssociationRepository` port.
#[derive(Clone)]
pub struct DieselAssociationRepository {
    pool: DbPool,
}

impl DieselAssociationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Run a single-column id query and parse the results.
macro_rules! linked_ids {
    ($self:ident, $table:ident, $filter:ident == $value:expr, $column:ident) => {{
        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<String> = $table::table
            .filter($table::$filter.eq($value))
            .select($table::$column)
            .order($table::$column.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        parse_ids(raw).map_err(map_row_error)
    }};
}

#[async_trait]
impl AssociationRepository for DieselAssociationRepository {
    async fn pass_event_ids(&self, pass_id: &PassId) -> Result<Vec<EventId>, RepositoryError> {
        linked_ids!(self, pass_events, pass_id == pass_id.as_str(), event_id)
    }

    async fn event_pass_ids(&self, event_id: &EventId) -> Result<Vec<PassId>, RepositoryError> {
        linked_ids!(self, pass_events, event_id == event_id.as_str(), pass_id)
    }

    async fn user_team_ids(&self, user_id: &UserId) -> Result<Vec<TeamId>, RepositoryError> {
        linked_ids!(self, team_users, user_id == user_id.as_str(), team_id)
    }

    async fn user_event_ids(&self, user_id: &UserId) -> Result<Vec<EventId>, RepositoryError> {
        linked_ids!(self, user_events, user_id == user_id.as_str(), event_id)
    }

    async fn team_user_ids(&self, team_id: &TeamId) -> Result<Vec<UserId>, RepositoryError> {
        linked_ids!(self, team_users, team_id == team_id.as_str(), user_id)
    }

    async fn team_event_ids(&self, team_id: &TeamId) -> Result<Vec<EventId>, RepositoryError> {
        linked_ids!(self, team_events, team_id == team_id.as_str(), event_id)
    }

    async fn event_team_ids(&self, event_id: &EventId) -> Result<Vec<TeamId>, RepositoryError> {
        linked_ids!(self, team_events, event_id == event_id.as_str(), team_id)
    }

    async fn event_user_ids(&self, event_id: &EventId) -> Result<Vec<UserId>, RepositoryError> {
        linked_ids!(self, user_events, event_id == event_id.as_str(), user_id)
    }
}
