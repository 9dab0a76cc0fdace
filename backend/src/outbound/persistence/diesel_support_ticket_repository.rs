//! PostgreSQL-backed `SupportTicketRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, SupportTicketRepository};
use crate::domain::{SupportTicket, SupportTicketId, SupportTicketPatch};

use super::diesel_error_mapping::{AdapterError, map_diesel_error, map_pool_error, map_row_error};
use super::models::SupportTicketRow;
use super::pool::DbPool;
use super::schema::support_tickets;

/// Diesel-backed implementation of the `SupportTicketRepository` port.
#[derive(Clone)]
pub struct DieselSupportTicketRepository {
    pool: DbPool,
}

impl DieselSupportTicketRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupportTicketRepository for DieselSupportTicketRepository {
    async fn create(&self, ticket: &SupportTicket) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(support_tickets::table)
            .values(SupportTicketRow::from(ticket))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &SupportTicketId,
    ) -> Result<Option<SupportTicket>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SupportTicketRow> = support_tickets::table
            .find(id.as_str())
            .select(SupportTicketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(SupportTicket::try_from)
            .transpose()
            .map_err(map_row_error)
    }

    async fn update(
        &self,
        id: &SupportTicketId,
        patch: &SupportTicketPatch,
    ) -> Result<Option<SupportTicket>, RepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let current: Option<SupportTicketRow> = support_tickets::table
                    .find(id.as_str())
                    .select(SupportTicketRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = current else {
                    return Ok(None);
                };

                let mut ticket = SupportTicket::try_from(row)?;
                patch.apply_to(&mut ticket);
                diesel::update(support_tickets::table.find(id.as_str()))
                    .set(SupportTicketRow::from(&ticket))
                    .execute(conn)
                    .await?;
                Ok::<_, AdapterError>(Some(ticket))
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }

    async fn delete(
        &self,
        id: &SupportTicketId,
    ) -> Result<Option<SupportTicket>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SupportTicketRow> =
            diesel::delete(support_tickets::table.find(id.as_str()))
                .returning(SupportTicketRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

        row.map(SupportTicket::try_from)
            .transpose()
            .map_err(map_row_error)
    }
}
