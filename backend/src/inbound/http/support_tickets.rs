//! Support-ticket endpoints.
//!
//! ```text
//! POST   /support-ticket
//! GET    /support-ticket/{ticket_id}
//! PATCH  /support-ticket/{ticket_id}
//! DELETE /support-ticket/{ticket_id}
//! POST   /support-ticket/{ticket_id}?solved=&emailAddress=
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::domain::{
    Error, SupportTicket, SupportTicketDraft, SupportTicketId, SupportTicketPatch,
    SupportTicketResolution,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::missing;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SolveQuery {
    /// `false` reopens the ticket.
    pub solved: bool,
    /// Volunteer closing the ticket. Only allowed when `solved` is `true`.
    #[serde(default)]
    pub email_address: Option<String>,
}

async fn apply(
    state: &HttpState,
    id: SupportTicketId,
    patch: SupportTicketPatch,
) -> ApiResult<web::Json<SupportTicket>> {
    state
        .support_tickets
        .update(&id, &patch)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("support ticket", &id))
}

#[utoipa::path(
    post,
    path = "/support-ticket",
    request_body = SupportTicketDraft,
    responses(
        (status = 200, description = "Raised ticket", body = SupportTicket),
        (status = 400, description = "Invalid ticket", body = Error)
    ),
    tags = ["support"],
    operation_id = "createSupportTicket"
)]
#[post("/support-ticket")]
pub async fn create_support_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<SupportTicketDraft>,
) -> ApiResult<web::Json<SupportTicket>> {
    let draft = payload.into_inner();
    draft.validate()?;
    let ticket = draft.into_ticket(SupportTicketId::generate(), state.clock.utc());
    state.support_tickets.create(&ticket).await?;
    info!(ticket_id = %ticket.id, category = %ticket.category, "support ticket raised");
    Ok(web::Json(ticket))
}

#[utoipa::path(
    get,
    path = "/support-ticket/{ticket_id}",
    params(("ticket_id" = String, Path)),
    responses(
        (status = 200, description = "Ticket", body = SupportTicket),
        (status = 404, description = "Unknown ticket", body = Error)
    ),
    tags = ["support"],
    operation_id = "getSupportTicket"
)]
#[get("/support-ticket/{ticket_id}")]
pub async fn get_support_ticket(
    state: web::Data<HttpState>,
    path: web::Path<SupportTicketId>,
) -> ApiResult<web::Json<SupportTicket>> {
    let id = path.into_inner();
    state
        .support_tickets
        .find_by_id(&id)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("support ticket", &id))
}

#[utoipa::path(
    post,
    path = "/support-ticket/{ticket_id}",
    params(("ticket_id" = String, Path), SolveQuery),
    responses(
        (status = 200, description = "Ticket with its new state", body = SupportTicket),
        (status = 400, description = "Email given while reopening; use PATCH for manual changes", body = Error),
        (status = 404, description = "Unknown ticket", body = Error)
    ),
    tags = ["support"],
    operation_id = "solveSupportTicket"
)]
#[post("/support-ticket/{ticket_id}")]
pub async fn solve_support_ticket(
    state: web::Data<HttpState>,
    path: web::Path<SupportTicketId>,
    query: web::Query<SolveQuery>,
) -> ApiResult<web::Json<SupportTicket>> {
    let id = path.into_inner();
    let SolveQuery {
        solved,
        email_address,
    } = query.into_inner();
    let resolution = SupportTicketResolution::new(solved, email_address)?;
    let ticket = apply(&state, id, resolution.into_patch()).await?;
    info!(ticket_id = %ticket.id, solved, "support ticket resolution changed");
    Ok(ticket)
}

#[utoipa::path(
    patch,
    path = "/support-ticket/{ticket_id}",
    params(("ticket_id" = String, Path)),
    request_body = SupportTicketPatch,
    responses(
        (status = 200, description = "Updated ticket", body = SupportTicket),
        (status = 400, description = "Invalid field", body = Error),
        (status = 404, description = "Unknown ticket", body = Error)
    ),
    tags = ["support"],
    operation_id = "updateSupportTicket"
)]
#[patch("/support-ticket/{ticket_id}")]
pub async fn update_support_ticket(
    state: web::Data<HttpState>,
    path: web::Path<SupportTicketId>,
    payload: web::Json<SupportTicketPatch>,
) -> ApiResult<web::Json<SupportTicket>> {
    let patch = payload.into_inner();
    patch.validate()?;
    apply(&state, path.into_inner(), patch).await
}

#[utoipa::path(
    delete,
    path = "/support-ticket/{ticket_id}",
    params(("ticket_id" = String, Path)),
    responses(
        (status = 200, description = "Deleted ticket", body = SupportTicket),
        (status = 404, description = "Unknown ticket", body = Error)
    ),
    tags = ["support"],
    operation_id = "deleteSupportTicket"
)]
#[delete("/support-ticket/{ticket_id}")]
pub async fn delete_support_ticket(
    state: web::Data<HttpState>,
    path: web::Path<SupportTicketId>,
) -> ApiResult<web::Json<SupportTicket>> {
    let id = path.into_inner();
    let ticket = state
        .support_tickets
        .delete(&id)
        .await?
        .ok_or_else(|| missing("support ticket", &id))?;
    info!(ticket_id = %id, "support ticket deleted");
    Ok(web::Json(ticket))
}
