//! PostgreSQL-backed `EventRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EventRepository, RepositoryError};
use crate::domain::{Event, EventId, EventPatch, UserId};

use super::diesel_error_mapping::{AdapterError, map_diesel_error, map_pool_error, map_row_error};
use super::models::{EventRow, convert_rows};
use super::pool::DbPool;
use super::schema::events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn create(&self, event: &Event) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(events::table)
            .values(EventRow::from(event))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EventRow> = events::table
            .find(id.as_str())
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Event::try_from).transpose().map_err(map_row_error)
    }

    async fn find_by_ids(&self, ids: &[EventId]) -> Result<Vec<Event>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let keys: Vec<&str> = ids.iter().map(EventId::as_str).collect();

        let rows: Vec<EventRow> = events::table
            .filter(events::id.eq_any(keys))
            .order((events::starts_at.asc().nulls_last(), events::name.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn list_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .order((events::starts_at.asc().nulls_last(), events::name.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn find_by_organizer(
        &self,
        organizer_id: &UserId,
    ) -> Result<Vec<Event>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .filter(events::organizer_id.eq(organizer_id.as_str()))
            .order((events::starts_at.asc().nulls_last(), events::name.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn update(
        &self,
        id: &EventId,
        patch: &EventPatch,
    ) -> Result<Option<Event>, RepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let current: Option<EventRow> = events::table
                    .find(id.as_str())
                    .select(EventRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = current else {
                    return Ok(None);
                };

                let mut event = Event::try_from(row)?;
                patch.apply_to(&mut event);
                diesel::update(events::table.find(id.as_str()))
                    .set(EventRow::from(&event))
                    .execute(conn)
                    .await?;
                Ok::<_, AdapterError>(Some(event))
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }

    async fn delete(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EventRow> = diesel::delete(events::table.find(id.as_str()))
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Event::try_from).transpose().map_err(map_row_error)
    }
}
