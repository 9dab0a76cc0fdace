//! PostgreSQL-backed `TeamRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, TeamRepository};
use crate::domain::{Team, TeamId, TeamPatch, UserId};

use super::diesel_error_mapping::{AdapterError, map_diesel_error, map_pool_error, map_row_error};
use super::models::{TeamRow, convert_rows, team_row};
use super::pool::DbPool;
use super::schema::teams;

/// Diesel-backed implementation of the `TeamRepository` port.
#[derive(Clone)]
pub struct DieselTeamRepository {
    pool: DbPool,
}

impl DieselTeamRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for DieselTeamRepository {
    async fn create(&self, team: &Team) -> Result<(), RepositoryError> {
        let row = team_row(team);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(teams::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TeamRow> = teams::table
            .find(id.as_str())
            .select(TeamRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Team::try_from).transpose().map_err(map_row_error)
    }

    async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let keys: Vec<&str> = ids.iter().map(TeamId::as_str).collect();

        let rows: Vec<TeamRow> = teams::table
            .filter(teams::id.eq_any(keys))
            .order(teams::name.asc())
            .select(TeamRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<Team>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TeamRow> = teams::table
            .filter(teams::host_id.eq(host_id.as_str()))
            .order(teams::name.asc())
            .select(TeamRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn update(
        &self,
        id: &TeamId,
        patch: &TeamPatch,
    ) -> Result<Option<Team>, RepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = conn
            .transaction(|conn| {
                async move {
                    let current: Option<TeamRow> = teams::table
                        .find(id.as_str())
                        .select(TeamRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = current else {
                        return Ok(None);
                    };

                    let mut team = Team::try_from(row)?;
                    patch.apply_to(&mut team);
                    diesel::update(teams::table.find(id.as_str()))
                        .set(team_row(&team))
                        .execute(conn)
                        .await?;
                    Ok::<_, AdapterError>(Some(team))
                }
                .scope_boxed()
            })
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &TeamId) -> Result<Option<Team>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TeamRow> = diesel::delete(teams::table.find(id.as_str()))
            .returning(TeamRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Team::try_from).transpose().map_err(map_row_error)
    }
}
