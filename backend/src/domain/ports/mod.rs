//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, the unit of work) are implemented by the
//! Diesel adapters in `outbound::persistence`. The driving port
//! [`AssociationCommand`] is implemented by the domain association service.

mod macros;
pub(crate) use macros::define_port_error;

mod association_command;
mod association_repository;
mod event_repository;
mod pass_repository;
mod repository_error;
mod support_ticket_repository;
mod team_repository;
mod unit_of_work;
mod user_repository;

pub use association_command::AssociationCommand;
#[cfg(test)]
pub use association_command::MockAssociationCommand;
pub use association_repository::AssociationRepository;
#[cfg(test)]
pub use association_repository::MockAssociationRepository;
pub use event_repository::EventRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use pass_repository::MockPassRepository;
pub use pass_repository::PassRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use support_ticket_repository::MockSupportTicketRepository;
pub use support_ticket_repository::SupportTicketRepository;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::TeamRepository;
#[cfg(test)]
pub use unit_of_work::MockEligibilityReader;
pub use unit_of_work::{EligibilityReader, UnitOfWork, UnitOfWorkProvider};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
