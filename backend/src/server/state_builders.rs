//! Builds HTTP state from the database pool.

use std::sync::Arc;

use actix_web::web;

use fest_backend::domain::AssociationService;
use fest_backend::inbound::http::state::{HttpState, HttpStatePorts};
use fest_backend::outbound::persistence::{
    DbPool, DieselAssociationRepository, DieselEventRepository, DieselPassRepository,
    DieselSupportTicketRepository, DieselTeamRepository, DieselUnitOfWorkProvider,
    DieselUserRepository,
};

/// Wire every port to its Diesel adapter.
///
/// Link creation and removal run through [`AssociationService`], which opens
/// one transaction per call via [`DieselUnitOfWorkProvider`].
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let links = AssociationService::new(Arc::new(DieselUnitOfWorkProvider::new(pool.clone())));
    web::Data::new(HttpState::new(HttpStatePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        passes: Arc::new(DieselPassRepository::new(pool.clone())),
        events: Arc::new(DieselEventRepository::new(pool.clone())),
        teams: Arc::new(DieselTeamRepository::new(pool.clone())),
        support_tickets: Arc::new(DieselSupportTicketRepository::new(pool.clone())),
        associations: Arc::new(DieselAssociationRepository::new(pool.clone())),
        links: Arc::new(links),
    }))
}
