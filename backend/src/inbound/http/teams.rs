//! Team endpoints.
//!
//! ```text
//! POST   /team
//! GET    /team/{team_id}
//! PATCH  /team/{team_id}
//! DELETE /team/{team_id}
//! GET    /team/{team_id}/users
//! GET    /team/{team_id}/events
//! POST   /team/{team_id}/events/{event_id}?validate=&hostOnly=
//! DELETE /team/{team_id}/events/{event_id}
//! ```
//!
//! Membership is managed from `/user/{user_id}/teams/{team_id}`.

use actix_web::{delete, get, patch, post, web};
use tracing::info;

use crate::domain::{
    Error, Event, EventId, Link, LinkCreated, Team, TeamDraft, TeamId, TeamPatch, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::missing;
use crate::inbound::http::links::{self, TeamEventQuery};
use crate::inbound::http::state::HttpState;

async fn require_team(state: &HttpState, id: &TeamId) -> ApiResult<Team> {
    state
        .teams
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("team", id))
}

#[utoipa::path(
    post,
    path = "/team",
    request_body = TeamDraft,
    responses(
        (status = 200, description = "Created team", body = Team),
        (status = 400, description = "Invalid team", body = Error),
        (status = 404, description = "Host does not exist", body = Error),
        (status = 409, description = "Team name taken", body = Error)
    ),
    tags = ["teams"],
    operation_id = "createTeam"
)]
#[post("/team")]
pub async fn create_team(
    state: web::Data<HttpState>,
    payload: web::Json<TeamDraft>,
) -> ApiResult<web::Json<Team>> {
    let draft = payload.into_inner();
    draft.validate()?;
    let team = draft.into_team(TeamId::generate());
    state.teams.create(&team).await?;
    info!(team_id = %team.id, host_id = %team.host_id, "team created");
    Ok(web::Json(team))
}

#[utoipa::path(
    get,
    path = "/team/{team_id}",
    params(("team_id" = String, Path)),
    responses(
        (status = 200, description = "Team", body = Team),
        (status = 404, description = "Unknown team", body = Error)
    ),
    tags = ["teams"],
    operation_id = "getTeam"
)]
#[get("/team/{team_id}")]
pub async fn get_team(
    state: web::Data<HttpState>,
    path: web::Path<TeamId>,
) -> ApiResult<web::Json<Team>> {
    require_team(&state, &path.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    patch,
    path = "/team/{team_id}",
    params(("team_id" = String, Path)),
    request_body = TeamPatch,
    responses(
        (status = 200, description = "Updated team", body = Team),
        (status = 400, description = "Invalid field", body = Error),
        (status = 404, description = "Unknown team or host", body = Error),
        (status = 409, description = "Team name taken", body = Error)
    ),
    tags = ["teams"],
    operation_id = "updateTeam"
)]
#[patch("/team/{team_id}")]
pub async fn update_team(
    state: web::Data<HttpState>,
    path: web::Path<TeamId>,
    payload: web::Json<TeamPatch>,
) -> ApiResult<web::Json<Team>> {
    let id = path.into_inner();
    let patch = payload.into_inner();
    patch.validate()?;
    state
        .teams
        .update(&id, &patch)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("team", &id))
}

#[utoipa::path(
    delete,
    path = "/team/{team_id}",
    params(("team_id" = String, Path)),
    responses(
        (status = 200, description = "Deleted team", body = Team),
        (status = 404, description = "Unknown team", body = Error)
    ),
    tags = ["teams"],
    operation_id = "deleteTeam"
)]
#[delete("/team/{team_id}")]
pub async fn delete_team(
    state: web::Data<HttpState>,
    path: web::Path<TeamId>,
) -> ApiResult<web::Json<Team>> {
    let id = path.into_inner();
    let team = state
        .teams
        .delete(&id)
        .await?
        .ok_or_else(|| missing("team", &id))?;
    info!(team_id = %id, "team disbanded");
    Ok(web::Json(team))
}

#[utoipa::path(
    get,
    path = "/team/{team_id}/users",
    params(("team_id" = String, Path)),
    responses(
        (status = 200, description = "Team members", body = [User]),
        (status = 404, description = "Unknown team", body = Error)
    ),
    tags = ["teams"],
    operation_id = "getTeamUsers"
)]
#[get("/team/{team_id}/users")]
pub async fn get_team_users(
    state: web::Data<HttpState>,
    path: web::Path<TeamId>,
) -> ApiResult<web::Json<Vec<User>>> {
    let team = require_team(&state, &path.into_inner()).await?;
    let ids = state.associations.team_user_ids(&team.id).await?;
    Ok(web::Json(state.users.find_by_ids(&ids).await?))
}

#[utoipa::path(
    get,
    path = "/team/{team_id}/events",
    params(("team_id" = String, Path)),
    responses(
        (status = 200, description = "Events the team entered", body = [Event]),
        (status = 404, description = "Unknown team", body = Error)
    ),
    tags = ["teams"],
    operation_id = "getTeamEvents"
)]
#[get("/team/{team_id}/events")]
pub async fn get_team_events(
    state: web::Data<HttpState>,
    path: web::Path<TeamId>,
) -> ApiResult<web::Json<Vec<Event>>> {
    let team = require_team(&state, &path.into_inner()).await?;
    let ids = state.associations.team_event_ids(&team.id).await?;
    Ok(web::Json(state.events.find_by_ids(&ids).await?))
}

#[utoipa::path(
    post,
    path = "/team/{team_id}/events/{event_id}",
    params(("team_id" = String, Path), ("event_id" = String, Path), TeamEventQuery),
    responses(
        (status = 200, description = "Team entered", body = LinkCreated),
        (status = 400, description = "A member lacks a required pass", body = Error),
        (status = 404, description = "Unknown team or event, or a member holds no pass", body = Error),
        (status = 409, description = "Already entered", body = Error)
    ),
    tags = ["teams"],
    operation_id = "createTeamEvent"
)]
#[post("/team/{team_id}/events/{event_id}")]
pub async fn create_team_event(
    state: web::Data<HttpState>,
    path: web::Path<(TeamId, EventId)>,
    query: web::Query<TeamEventQuery>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (team_id, event_id) = path.into_inner();
    links::create(
        &state,
        Link::team_event(team_id, event_id),
        query.into_inner().into(),
    )
    .await
}

#[utoipa::path(
    delete,
    path = "/team/{team_id}/events/{event_id}",
    params(("team_id" = String, Path), ("event_id" = String, Path)),
    responses(
        (status = 200, description = "Entry withdrawn", body = LinkCreated),
        (status = 404, description = "No such entry", body = Error)
    ),
    tags = ["teams"],
    operation_id = "deleteTeamEvent"
)]
#[delete("/team/{team_id}/events/{event_id}")]
pub async fn delete_team_event(
    state: web::Data<HttpState>,
    path: web::Path<(TeamId, EventId)>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (team_id, event_id) = path.into_inner();
    links::delete(&state, Link::team_event(team_id, event_id)).await
}
