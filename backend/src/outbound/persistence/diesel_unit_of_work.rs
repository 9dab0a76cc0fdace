//! Transactional link writes for the association service.
//!
//! A [`DieselUnitOfWork`] owns one pooled connection with an open
//! transaction. Eligibility reads and the link write share that transaction,
//! so a concurrent pass or membership change cannot slip between the check
//! and the insert. Dropping a unit without committing leaves the transaction
//! open; the pool discards such connections on return.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};
use tracing::debug;

use crate::domain::ports::{
    EligibilityReader, RepositoryError, UnitOfWork, UnitOfWorkProvider,
};
use crate::domain::{EventId, Link, LinkId, PassId, TeamId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{RowConversionError, parse_ids};
use super::pool::DbPool;
use super::schema::{pass_events, team_events, team_users, teams, user_events, users};

type Transactions = AnsiTransactionManager;

/// Opens a transaction per unit of work.
#[derive(Clone)]
pub struct DieselUnitOfWorkProvider {
    pool: DbPool,
}

impl DieselUnitOfWorkProvider {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkProvider for DieselUnitOfWorkProvider {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let mut conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        <Transactions as TransactionManager<AsyncPgConnection>>::begin_transaction(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Box::new(DieselUnitOfWork { conn }))
    }
}

/// A single open transaction.
pub struct DieselUnitOfWork {
    conn: PooledConnection<'static, AsyncPgConnection>,
}

fn parse_optional<T>(raw: Option<String>) -> Result<Option<T>, RepositoryError>
where
    T: TryFrom<String, Error = crate::domain::IdValidationError>,
{
    raw.map(T::try_from)
        .transpose()
        .map_err(RowConversionError::from)
        .map_err(map_row_error)
}

#[async_trait]
impl EligibilityReader for DieselUnitOfWork {
    async fn event_pass_ids(&mut self, event_id: &EventId) -> Result<Vec<PassId>, RepositoryError> {
        let raw: Vec<String> = pass_events::table
            .filter(pass_events::event_id.eq(event_id.as_str()))
            .select(pass_events::pass_id)
            .load(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        parse_ids(raw).map_err(map_row_error)
    }

    async fn user_pass_id(&mut self, user_id: &UserId) -> Result<Option<PassId>, RepositoryError> {
        let raw: Option<Option<String>> = users::table
            .find(user_id.as_str())
            .select(users::pass_id)
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        parse_optional(raw.flatten())
    }

    async fn team_host_id(&mut self, team_id: &TeamId) -> Result<Option<UserId>, RepositoryError> {
        let raw: Option<String> = teams::table
            .find(team_id.as_str())
            .select(teams::host_id)
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        parse_optional(raw)
    }

    async fn team_member_ids(&mut self, team_id: &TeamId) -> Result<Vec<UserId>, RepositoryError> {
        let raw: Vec<String> = team_users::table
            .filter(team_users::team_id.eq(team_id.as_str()))
            .select(team_users::user_id)
            .load(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        parse_ids(raw).map_err(map_row_error)
    }

    async fn team_event_ids(&mut self, team_id: &TeamId) -> Result<Vec<EventId>, RepositoryError> {
        let raw: Vec<String> = team_events::table
            .filter(team_events::team_id.eq(team_id.as_str()))
            .select(team_events::event_id)
            .load(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        parse_ids(raw).map_err(map_row_error)
    }
}

#[async_trait]
impl UnitOfWork for DieselUnitOfWork {
    async fn insert_link(&mut self, link: &Link, id: &LinkId) -> Result<(), RepositoryError> {
        let conn = &mut *self.conn;
        let inserted = match link {
            Link::PassEvent { pass_id, event_id } => {
                diesel::insert_into(pass_events::table)
                    .values((
                        pass_events::id.eq(id.as_str()),
                        pass_events::pass_id.eq(pass_id.as_str()),
                        pass_events::event_id.eq(event_id.as_str()),
                    ))
                    .execute(conn)
                    .await
            }
            Link::TeamUser { team_id, user_id } => {
                diesel::insert_into(team_users::table)
                    .values((
                        team_users::id.eq(id.as_str()),
                        team_users::team_id.eq(team_id.as_str()),
                        team_users::user_id.eq(user_id.as_str()),
                    ))
                    .execute(conn)
                    .await
            }
            Link::TeamEvent { team_id, event_id } => {
                diesel::insert_into(team_events::table)
                    .values((
                        team_events::id.eq(id.as_str()),
                        team_events::team_id.eq(team_id.as_str()),
                        team_events::event_id.eq(event_id.as_str()),
                    ))
                    .execute(conn)
                    .await
            }
            Link::UserEvent { user_id, event_id } => {
                diesel::insert_into(user_events::table)
                    .values((
                        user_events::id.eq(id.as_str()),
                        user_events::user_id.eq(user_id.as_str()),
                        user_events::event_id.eq(event_id.as_str()),
                    ))
                    .execute(conn)
                    .await
            }
        };
        inserted.map(|_| ()).map_err(map_diesel_error)
    }

    async fn delete_link(&mut self, link: &Link) -> Result<Option<LinkId>, RepositoryError> {
        let conn = &mut *self.conn;
        let removed: Option<String> = match link {
            Link::PassEvent { pass_id, event_id } => {
                diesel::delete(
                    pass_events::table
                        .filter(pass_events::pass_id.eq(pass_id.as_str()))
                        .filter(pass_events::event_id.eq(event_id.as_str())),
                )
                .returning(pass_events::id)
                .get_result(conn)
                .await
            }
            Link::TeamUser { team_id, user_id } => {
                diesel::delete(
                    team_users::table
                        .filter(team_users::team_id.eq(team_id.as_str()))
                        .filter(team_users::user_id.eq(user_id.as_str())),
                )
                .returning(team_users::id)
                .get_result(conn)
                .await
            }
            Link::TeamEvent { team_id, event_id } => {
                diesel::delete(
                    team_events::table
                        .filter(team_events::team_id.eq(team_id.as_str()))
                        .filter(team_events::event_id.eq(event_id.as_str())),
                )
                .returning(team_events::id)
                .get_result(conn)
                .await
            }
            Link::UserEvent { user_id, event_id } => {
                diesel::delete(
                    user_events::table
                        .filter(user_events::user_id.eq(user_id.as_str()))
                        .filter(user_events::event_id.eq(event_id.as_str())),
                )
                .returning(user_events::id)
                .get_result(conn)
                .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;
        parse_optional(removed)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), RepositoryError> {
        <Transactions as TransactionManager<AsyncPgConnection>>::commit_transaction(
            &mut *self.conn,
        )
        .await
        .map_err(map_diesel_error)
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), RepositoryError> {
        debug!("rolling back link transaction");
        <Transactions as TransactionManager<AsyncPgConnection>>::rollback_transaction(
            &mut *self.conn,
        )
        .await
        .map_err(map_diesel_error)
    }
}
