//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod events;
pub mod health;
pub mod links;
pub mod passes;
pub mod state;
pub mod support_tickets;
pub mod teams;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every fest resource route.
///
/// Literal segments such as `/user/id` are registered before the `{id}`
/// patterns they would otherwise be captured by.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::get_user_id_by_email)
        .service(users::get_user_id_by_registration_number)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(users::get_user_pass)
        .service(users::get_user_organized_events)
        .service(users::get_user_teams)
        .service(users::create_user_team)
        .service(users::delete_user_team)
        .service(users::get_user_events)
        .service(users::create_user_event)
        .service(users::delete_user_event)
        .service(passes::list_passes)
        .service(passes::create_pass)
        .service(passes::get_pass)
        .service(passes::update_pass)
        .service(passes::delete_pass)
        .service(passes::get_pass_events)
        .service(passes::create_pass_event)
        .service(passes::delete_pass_event)
        .service(events::list_events)
        .service(events::create_event)
        .service(events::get_event)
        .service(events::update_event)
        .service(events::delete_event)
        .service(events::get_event_passes)
        .service(events::get_event_teams)
        .service(events::get_event_users)
        .service(teams::create_team)
        .service(teams::get_team)
        .service(teams::update_team)
        .service(teams::delete_team)
        .service(teams::get_team_users)
        .service(teams::get_team_events)
        .service(teams::create_team_event)
        .service(teams::delete_team_event)
        .service(support_tickets::create_support_ticket)
        .service(support_tickets::get_support_ticket)
        .service(support_tickets::solve_support_ticket)
        .service(support_tickets::update_support_ticket)
        .service(support_tickets::delete_support_ticket);
}
