//! PostgreSQL-backed `PassRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PassRepository, RepositoryError};
use crate::domain::{Pass, PassId, PassPatch};

use super::diesel_error_mapping::{AdapterError, map_diesel_error, map_pool_error, map_row_error};
use super::models::{PassRow, convert_rows};
use super::pool::DbPool;
use super::schema::passes;

/// Diesel-backed implementation of the `PassRepository` port.
#[derive(Clone)]
pub struct DieselPassRepository {
    pool: DbPool,
}

impl DieselPassRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PassRepository for DieselPassRepository {
    async fn create(&self, pass: &Pass) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(passes::table)
            .values(PassRow::from(pass))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PassId) -> Result<Option<Pass>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PassRow> = passes::table
            .find(id.as_str())
            .select(PassRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Pass::try_from).transpose().map_err(map_row_error)
    }

    async fn find_by_ids(&self, ids: &[PassId]) -> Result<Vec<Pass>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let keys: Vec<&str> = ids.iter().map(PassId::as_str).collect();

        let rows: Vec<PassRow> = passes::table
            .filter(passes::id.eq_any(keys))
            .order(passes::cost.asc())
            .select(PassRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn list_all(&self) -> Result<Vec<Pass>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PassRow> = passes::table
            .order((passes::cost.asc(), passes::name.asc()))
            .select(PassRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn update(
        &self,
        id: &PassId,
        patch: &PassPatch,
    ) -> Result<Option<Pass>, RepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let current: Option<PassRow> = passes::table
                    .find(id.as_str())
                    .select(PassRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = current else {
                    return Ok(None);
                };

                let mut pass = Pass::try_from(row)?;
                patch.apply_to(&mut pass);
                diesel::update(passes::table.find(id.as_str()))
                    .set(PassRow::from(&pass))
                    .execute(conn)
                    .await?;
                Ok::<_, AdapterError>(Some(pass))
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }

    async fn delete(&self, id: &PassId) -> Result<Option<Pass>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PassRow> = diesel::delete(passes::table.find(id.as_str()))
            .returning(PassRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Pass::try_from).transpose().map_err(map_row_error)
    }
}
