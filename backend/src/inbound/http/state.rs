//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    AssociationCommand, AssociationRepository, EventRepository, PassRepository,
    SupportTicketRepository, TeamRepository, UserRepository,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub passes: Arc<dyn PassRepository>,
    pub events: Arc<dyn EventRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub support_tickets: Arc<dyn SupportTicketRepository>,
    pub associations: Arc<dyn AssociationRepository>,
    pub links: Arc<dyn AssociationCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub passes: Arc<dyn PassRepository>,
    pub events: Arc<dyn EventRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub support_tickets: Arc<dyn SupportTicketRepository>,
    pub associations: Arc<dyn AssociationRepository>,
    pub links: Arc<dyn AssociationCommand>,
    /// Source of default support ticket timestamps.
    pub clock: Arc<dyn Clock>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle using the system clock.
    ///
    /// # Examples
    /// ```
    /// use fest_backend::inbound::http::state::HttpState;
    /// use fest_backend::test_support::{InMemoryFestStore, in_memory_http_state};
    ///
    /// let state: HttpState = in_memory_http_state(&InMemoryFestStore::new());
    /// let _links = state.links.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            passes,
            events,
            teams,
            support_tickets,
            associations,
            links,
        } = ports;
        Self {
            users,
            passes,
            events,
            teams,
            support_tickets,
            associations,
            links,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock, typically with a fixed one in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
