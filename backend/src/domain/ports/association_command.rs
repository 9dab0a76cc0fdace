//! Driving port for creating and removing association links.

use async_trait::async_trait;

use crate::domain::{Error, Link, LinkId, LinkValidation};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssociationCommand: Send + Sync {
    /// Create `link` after the eligibility checks selected by `validation`.
    ///
    /// Ineligible pairs yield [`crate::domain::ErrorCode::InvalidRequest`];
    /// missing prerequisites yield [`crate::domain::ErrorCode::NotFound`].
    async fn create_link(&self, link: Link, validation: LinkValidation) -> Result<LinkId, Error>;

    /// Remove `link` without re-validating anything.
    async fn delete_link(&self, link: Link) -> Result<LinkId, Error>;
}
