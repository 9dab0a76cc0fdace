//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   types. Validation and eligibility rules stay in the domain.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//!   this module.
//! - Link writes go through [`DieselUnitOfWorkProvider`], which keeps the
//!   eligibility reads and the insert inside one transaction.
//!
//! # Example
//!
//! ```ignore
//! use fest_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/fest")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_association_repository;
mod diesel_error_mapping;
mod diesel_event_repository;
mod diesel_pass_repository;
mod diesel_support_ticket_repository;
mod diesel_team_repository;
mod diesel_unit_of_work;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_association_repository::DieselAssociationRepository;
pub use diesel_event_repository::DieselEventRepository;
pub use diesel_pass_repository::DieselPassRepository;
pub use diesel_support_ticket_repository::DieselSupportTicketRepository;
pub use diesel_team_repository::DieselTeamRepository;
pub use diesel_unit_of_work::{DieselUnitOfWork, DieselUnitOfWorkProvider};
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
