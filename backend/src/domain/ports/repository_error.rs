//! Error shared by every persistence port.

use tracing::warn;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository and unit-of-work adapters.
    pub enum RepositoryError {
        /// No connection could be checked out of the pool.
        Connection { message: String } =>
            "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "repository query failed: {message}",
        /// A unique constraint rejected the write.
        UniqueViolation { message: String } =>
            "record already exists: {message}",
        /// A referenced row does not exist.
        ForeignKeyViolation { message: String } =>
            "referenced record does not exist: {message}",
    }
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Connection { message } => {
                Error::service_unavailable(format!("database unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Error::internal(format!("database error: {message}"))
            }
            RepositoryError::UniqueViolation { message } => Error::conflict(message),
            RepositoryError::ForeignKeyViolation { message } => {
                warn!(%message, "write referenced a missing record");
                Error::not_found(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::unique_violation("team_users"), ErrorCode::Conflict)]
    #[case(RepositoryError::foreign_key_violation("teams.host_id"), ErrorCode::NotFound)]
    fn maps_to_domain_codes(#[case] error: RepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }
}
