//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every fest endpoint from the inbound HTTP layer along
//! with the entity, draft, patch and error schemas they exchange. The document
//! backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump` for client generation.

use utoipa::OpenApi;

use crate::domain::{
    Error, ErrorCode, Event, EventCategory, EventDraft, EventPatch, LinkCreated, Pass, PassDraft,
    PassPatch, SupportTicket, SupportTicketCategory, SupportTicketDraft, SupportTicketPatch, Team,
    TeamDraft, TeamPatch, User, UserDraft, UserPatch,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fest backend API",
        description = "Users, passes, events, teams and support tickets for a college fest.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user_id_by_email,
        crate::inbound::http::users::get_user_id_by_registration_number,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::get_user_pass,
        crate::inbound::http::users::get_user_organized_events,
        crate::inbound::http::users::get_user_teams,
        crate::inbound::http::users::create_user_team,
        crate::inbound::http::users::delete_user_team,
        crate::inbound::http::users::get_user_events,
        crate::inbound::http::users::create_user_event,
        crate::inbound::http::users::delete_user_event,
        crate::inbound::http::passes::list_passes,
        crate::inbound::http::passes::create_pass,
        crate::inbound::http::passes::get_pass,
        crate::inbound::http::passes::update_pass,
        crate::inbound::http::passes::delete_pass,
        crate::inbound::http::passes::get_pass_events,
        crate::inbound::http::passes::create_pass_event,
        crate::inbound::http::passes::delete_pass_event,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::get_event,
        crate::inbound::http::events::update_event,
        crate::inbound::http::events::delete_event,
        crate::inbound::http::events::get_event_passes,
        crate::inbound::http::events::get_event_teams,
        crate::inbound::http::events::get_event_users,
        crate::inbound::http::teams::create_team,
        crate::inbound::http::teams::get_team,
        crate::inbound::http::teams::update_team,
        crate::inbound::http::teams::delete_team,
        crate::inbound::http::teams::get_team_users,
        crate::inbound::http::teams::get_team_events,
        crate::inbound::http::teams::create_team_event,
        crate::inbound::http::teams::delete_team_event,
        crate::inbound::http::support_tickets::create_support_ticket,
        crate::inbound::http::support_tickets::get_support_ticket,
        crate::inbound::http::support_tickets::solve_support_ticket,
        crate::inbound::http::support_tickets::update_support_ticket,
        crate::inbound::http::support_tickets::delete_support_ticket,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserDraft,
        UserPatch,
        Pass,
        PassDraft,
        PassPatch,
        Event,
        EventCategory,
        EventDraft,
        EventPatch,
        Team,
        TeamDraft,
        TeamPatch,
        SupportTicket,
        SupportTicketCategory,
        SupportTicketDraft,
        SupportTicketPatch,
        LinkCreated,
    )),
    tags(
        (name = "users", description = "Participants, their pass, teams and registrations"),
        (name = "passes", description = "Passes and the events they unlock"),
        (name = "events", description = "The fest schedule"),
        (name = "teams", description = "Teams and their event entries"),
        (name = "support", description = "Help-desk tickets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
