//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{User, UserId, UserPatch};

use super::diesel_error_mapping::{AdapterError, map_diesel_error, map_pool_error, map_row_error};
use super::models::{RowConversionError, UserRow, convert_rows};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_user_id(raw: String) -> Result<UserId, RepositoryError> {
    UserId::new(raw)
        .map_err(RowConversionError::from)
        .map_err(map_row_error)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(UserRow::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose().map_err(map_row_error)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let keys: Vec<&str> = ids.iter().map(UserId::as_str).collect();

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(keys))
            .order(users::last_name.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows).map_err(map_row_error)
    }

    async fn find_id_by_email(
        &self,
        email_address: &str,
    ) -> Result<Option<UserId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<String> = users::table
            .filter(users::email_address.eq(email_address))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        id.map(parse_user_id).transpose()
    }

    async fn find_id_by_registration_number(
        &self,
        registration_number: i64,
    ) -> Result<Option<UserId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<String> = users::table
            .filter(users::registration_number.eq(registration_number))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        id.map(parse_user_id).transpose()
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let current: Option<UserRow> = users::table
                    .find(id.as_str())
                    .select(UserRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = current else {
                    return Ok(None);
                };

                let mut user = User::try_from(row)?;
                patch.apply_to(&mut user);
                diesel::update(users::table.find(id.as_str()))
                    .set(UserRow::from(&user))
                    .execute(conn)
                    .await?;
                Ok::<_, AdapterError>(Some(user))
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::delete(users::table.find(id.as_str()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose().map_err(map_row_error)
    }
}
