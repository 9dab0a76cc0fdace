//! Pass endpoints.
//!
//! ```text
//! GET    /pass
//! POST   /pass
//! GET    /pass/{pass_id}
//! PATCH  /pass/{pass_id}
//! DELETE /pass/{pass_id}
//! GET    /pass/{pass_id}/events
//! POST   /pass/{pass_id}/events/{event_id}
//! DELETE /pass/{pass_id}/events/{event_id}
//! ```

use actix_web::{delete, get, patch, post, web};
use tracing::info;

use crate::domain::{
    Error, Event, EventId, Link, LinkCreated, LinkValidation, Pass, PassDraft, PassId, PassPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::missing;
use crate::inbound::http::links;
use crate::inbound::http::state::HttpState;

async fn require_pass(state: &HttpState, id: &PassId) -> ApiResult<Pass> {
    state
        .passes
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("pass", id))
}

#[utoipa::path(
    get,
    path = "/pass",
    responses((status = 200, description = "Every pass on sale", body = [Pass])),
    tags = ["passes"],
    operation_id = "listPasses"
)]
#[get("/pass")]
pub async fn list_passes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Pass>>> {
    Ok(web::Json(state.passes.list_all().await?))
}

#[utoipa::path(
    post,
    path = "/pass",
    request_body = PassDraft,
    responses(
        (status = 200, description = "Created pass", body = Pass),
        (status = 400, description = "Invalid pass", body = Error)
    ),
    tags = ["passes"],
    operation_id = "createPass"
)]
#[post("/pass")]
pub async fn create_pass(
    state: web::Data<HttpState>,
    payload: web::Json<PassDraft>,
) -> ApiResult<web::Json<Pass>> {
    let draft = payload.into_inner();
    draft.validate()?;
    let pass = draft.into_pass(PassId::generate());
    state.passes.create(&pass).await?;
    info!(pass_id = %pass.id, cost = %pass.cost, "pass created");
    Ok(web::Json(pass))
}

#[utoipa::path(
    get,
    path = "/pass/{pass_id}",
    params(("pass_id" = String, Path)),
    responses(
        (status = 200, description = "Pass", body = Pass),
        (status = 404, description = "Unknown pass", body = Error)
    ),
    tags = ["passes"],
    operation_id = "getPass"
)]
#[get("/pass/{pass_id}")]
pub async fn get_pass(
    state: web::Data<HttpState>,
    path: web::Path<PassId>,
) -> ApiResult<web::Json<Pass>> {
    require_pass(&state, &path.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    patch,
    path = "/pass/{pass_id}",
    params(("pass_id" = String, Path)),
    request_body = PassPatch,
    responses(
        (status = 200, description = "Updated pass", body = Pass),
        (status = 400, description = "Invalid field", body = Error),
        (status = 404, description = "Unknown pass", body = Error)
    ),
    tags = ["passes"],
    operation_id = "updatePass"
)]
#[patch("/pass/{pass_id}")]
pub async fn update_pass(
    state: web::Data<HttpState>,
    path: web::Path<PassId>,
    payload: web::Json<PassPatch>,
) -> ApiResult<web::Json<Pass>> {
    let id = path.into_inner();
    let patch = payload.into_inner();
    patch.validate()?;
    state
        .passes
        .update(&id, &patch)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("pass", &id))
}

#[utoipa::path(
    delete,
    path = "/pass/{pass_id}",
    params(("pass_id" = String, Path)),
    responses(
        (status = 200, description = "Deleted pass", body = Pass),
        (status = 404, description = "Unknown pass", body = Error),
        (status = 409, description = "Pass is still held by users", body = Error)
    ),
    tags = ["passes"],
    operation_id = "deletePass"
)]
#[delete("/pass/{pass_id}")]
pub async fn delete_pass(
    state: web::Data<HttpState>,
    path: web::Path<PassId>,
) -> ApiResult<web::Json<Pass>> {
    let id = path.into_inner();
    let pass = state
        .passes
        .delete(&id)
        .await?
        .ok_or_else(|| missing("pass", &id))?;
    info!(pass_id = %id, "pass deleted");
    Ok(web::Json(pass))
}

#[utoipa::path(
    get,
    path = "/pass/{pass_id}/events",
    params(("pass_id" = String, Path)),
    responses(
        (status = 200, description = "Events the pass grants entry to", body = [Event]),
        (status = 404, description = "Unknown pass", body = Error)
    ),
    tags = ["passes"],
    operation_id = "getPassEvents"
)]
#[get("/pass/{pass_id}/events")]
pub async fn get_pass_events(
    state: web::Data<HttpState>,
    path: web::Path<PassId>,
) -> ApiResult<web::Json<Vec<Event>>> {
    let pass = require_pass(&state, &path.into_inner()).await?;
    let ids = state.associations.pass_event_ids(&pass.id).await?;
    Ok(web::Json(state.events.find_by_ids(&ids).await?))
}

#[utoipa::path(
    post,
    path = "/pass/{pass_id}/events/{event_id}",
    params(("pass_id" = String, Path), ("event_id" = String, Path)),
    responses(
        (status = 200, description = "Pass now grants entry", body = LinkCreated),
        (status = 404, description = "Unknown pass or event", body = Error),
        (status = 409, description = "Already linked", body = Error)
    ),
    tags = ["passes"],
    operation_id = "createPassEvent"
)]
#[post("/pass/{pass_id}/events/{event_id}")]
pub async fn create_pass_event(
    state: web::Data<HttpState>,
    path: web::Path<(PassId, EventId)>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (pass_id, event_id) = path.into_inner();
    links::create(
        &state,
        Link::pass_event(pass_id, event_id),
        LinkValidation::skip(),
    )
    .await
}

#[utoipa::path(
    delete,
    path = "/pass/{pass_id}/events/{event_id}",
    params(("pass_id" = String, Path), ("event_id" = String, Path)),
    responses(
        (status = 200, description = "Link removed", body = LinkCreated),
        (status = 404, description = "No such link", body = Error)
    ),
    tags = ["passes"],
    operation_id = "deletePassEvent"
)]
#[delete("/pass/{pass_id}/events/{event_id}")]
pub async fn delete_pass_event(
    state: web::Data<HttpState>,
    path: web::Path<(PassId, EventId)>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (pass_id, event_id) = path.into_inner();
    links::delete(&state, Link::pass_event(pass_id, event_id)).await
}
