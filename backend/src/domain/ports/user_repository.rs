//! Port for participant persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserPatch};

use super::RepositoryError;

/// CRUD and lookup operations over users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Duplicate email addresses or registration numbers
    /// raise [`RepositoryError::UniqueViolation`].
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch several users; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;

    async fn find_id_by_email(&self, email_address: &str)
    -> Result<Option<UserId>, RepositoryError>;

    async fn find_id_by_registration_number(
        &self,
        registration_number: i64,
    ) -> Result<Option<UserId>, RepositoryError>;

    /// Merge `patch` onto the stored user. Returns `None` when absent.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError>;

    /// Remove a user and return the removed record. Teams they host and
    /// their links are removed with them.
    async fn delete(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
}
