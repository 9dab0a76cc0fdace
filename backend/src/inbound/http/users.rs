//! User endpoints.
//!
//! ```text
//! POST   /user
//! GET    /user/id?emailAddress=
//! GET    /user/id-registration?registrationNumber=
//! GET    /user/{user_id}
//! PATCH  /user/{user_id}
//! DELETE /user/{user_id}
//! GET    /user/{user_id}/pass
//! GET    /user/{user_id}/organized-events
//! GET    /user/{user_id}/teams?host=
//! POST   /user/{user_id}/teams/{team_id}?validate=
//! DELETE /user/{user_id}/teams/{team_id}
//! GET    /user/{user_id}/events
//! POST   /user/{user_id}/events/{event_id}?validate=
//! DELETE /user/{user_id}/events/{event_id}
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::domain::{
    Error, Event, EventId, Link, LinkCreated, Pass, Team, TeamId, User, UserDraft, UserId,
    UserPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::missing;
use crate::inbound::http::links::{self, ValidateQuery};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct EmailQuery {
    pub email_address: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct RegistrationQuery {
    pub registration_number: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HostQuery {
    /// `true` lists teams the user hosts; `false` lists teams they joined.
    pub host: bool,
}

pub(crate) async fn require_user(state: &HttpState, id: &UserId) -> ApiResult<User> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("user", id))
}

#[utoipa::path(
    post,
    path = "/user",
    request_body = UserDraft,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Invalid user", body = Error),
        (status = 404, description = "Held pass does not exist", body = Error),
        (status = 409, description = "Email or registration number taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let draft = payload.into_inner();
    draft.validate()?;
    let user = draft.into_user(UserId::generate());
    state.users.create(&user).await?;
    info!(user_id = %user.id, "user registered");
    Ok(web::Json(user))
}

#[utoipa::path(
    get,
    path = "/user/id",
    params(EmailQuery),
    responses(
        (status = 200, description = "User id", body = String),
        (status = 404, description = "No user with that email", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserIdByEmail"
)]
#[get("/user/id")]
pub async fn get_user_id_by_email(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<UserId>> {
    let email = query.into_inner().email_address;
    state
        .users
        .find_id_by_email(&email)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("no user with email address {email}")))
}

#[utoipa::path(
    get,
    path = "/user/id-registration",
    params(RegistrationQuery),
    responses(
        (status = 200, description = "User id", body = String),
        (status = 404, description = "No user with that registration number", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserIdByRegistrationNumber"
)]
#[get("/user/id-registration")]
pub async fn get_user_id_by_registration_number(
    state: web::Data<HttpState>,
    query: web::Query<RegistrationQuery>,
) -> ApiResult<web::Json<UserId>> {
    let number = query.into_inner().registration_number;
    state
        .users
        .find_id_by_registration_number(number)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("no user with registration number {number}")))
}

#[utoipa::path(
    get,
    path = "/user/{user_id}",
    params(("user_id" = String, Path)),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<User>> {
    require_user(&state, &path.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    patch,
    path = "/user/{user_id}",
    params(("user_id" = String, Path)),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid field", body = Error),
        (status = 404, description = "Unknown user or pass", body = Error),
        (status = 409, description = "Email or registration number taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/user/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
    payload: web::Json<UserPatch>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let patch = payload.into_inner();
    patch.validate()?;
    state
        .users
        .update(&id, &patch)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("user", &id))
}

#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    params(("user_id" = String, Path)),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let user = state
        .users
        .delete(&id)
        .await?
        .ok_or_else(|| missing("user", &id))?;
    info!(user_id = %id, "user deleted");
    Ok(web::Json(user))
}

#[utoipa::path(
    get,
    path = "/user/{user_id}/pass",
    params(("user_id" = String, Path)),
    responses(
        (status = 200, description = "Held pass", body = Pass),
        (status = 404, description = "Unknown user or no pass held", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserPass"
)]
#[get("/user/{user_id}/pass")]
pub async fn get_user_pass(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Pass>> {
    let user = require_user(&state, &path.into_inner()).await?;
    let pass_id = user
        .pass_id
        .ok_or_else(|| Error::not_found(format!("user {} holds no pass", user.id)))?;
    state
        .passes
        .find_by_id(&pass_id)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("pass", &pass_id))
}

#[utoipa::path(
    get,
    path = "/user/{user_id}/organized-events",
    params(("user_id" = String, Path)),
    responses(
        (status = 200, description = "Events the user organises", body = [Event]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserOrganizedEvents"
)]
#[get("/user/{user_id}/organized-events")]
pub async fn get_user_organized_events(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<Event>>> {
    let user = require_user(&state, &path.into_inner()).await?;
    Ok(web::Json(state.events.find_by_organizer(&user.id).await?))
}

#[utoipa::path(
    get,
    path = "/user/{user_id}/teams",
    params(("user_id" = String, Path), HostQuery),
    responses(
        (status = 200, description = "Hosted or joined teams", body = [Team]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserTeams"
)]
#[get("/user/{user_id}/teams")]
pub async fn get_user_teams(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
    query: web::Query<HostQuery>,
) -> ApiResult<web::Json<Vec<Team>>> {
    let user = require_user(&state, &path.into_inner()).await?;
    let teams = if query.host {
        state.teams.find_by_host(&user.id).await?
    } else {
        let ids = state.associations.user_team_ids(&user.id).await?;
        state.teams.find_by_ids(&ids).await?
    };
    Ok(web::Json(teams))
}

#[utoipa::path(
    post,
    path = "/user/{user_id}/teams/{team_id}",
    params(("user_id" = String, Path), ("team_id" = String, Path), ValidateQuery),
    responses(
        (status = 200, description = "Membership created", body = LinkCreated),
        (status = 400, description = "User lacks a pass for a team event", body = Error),
        (status = 404, description = "Unknown user or team, or user holds no pass", body = Error),
        (status = 409, description = "Already a member", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUserTeam"
)]
#[post("/user/{user_id}/teams/{team_id}")]
pub async fn create_user_team(
    state: web::Data<HttpState>,
    path: web::Path<(UserId, TeamId)>,
    query: web::Query<ValidateQuery>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (user_id, team_id) = path.into_inner();
    links::create(
        &state,
        Link::team_user(team_id, user_id),
        query.into_inner().into(),
    )
    .await
}

#[utoipa::path(
    delete,
    path = "/user/{user_id}/teams/{team_id}",
    params(("user_id" = String, Path), ("team_id" = String, Path)),
    responses(
        (status = 200, description = "Membership removed", body = LinkCreated),
        (status = 403, description = "User hosts the team", body = Error),
        (status = 404, description = "Unknown team or membership", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUserTeam"
)]
#[delete("/user/{user_id}/teams/{team_id}")]
pub async fn delete_user_team(
    state: web::Data<HttpState>,
    path: web::Path<(UserId, TeamId)>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (user_id, team_id) = path.into_inner();
    let team = state
        .teams
        .find_by_id(&team_id)
        .await?
        .ok_or_else(|| missing("team", &team_id))?;
    if team.host_id == user_id {
        info!(%team_id, %user_id, "refused to remove team host");
        return Err(Error::forbidden("cannot remove the host of a team"));
    }
    links::delete(&state, Link::team_user(team_id, user_id)).await
}

#[utoipa::path(
    get,
    path = "/user/{user_id}/events",
    params(("user_id" = String, Path)),
    responses(
        (status = 200, description = "Events the user registered for", body = [Event]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserEvents"
)]
#[get("/user/{user_id}/events")]
pub async fn get_user_events(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<Event>>> {
    let user = require_user(&state, &path.into_inner()).await?;
    let ids = state.associations.user_event_ids(&user.id).await?;
    Ok(web::Json(state.events.find_by_ids(&ids).await?))
}

#[utoipa::path(
    post,
    path = "/user/{user_id}/events/{event_id}",
    params(("user_id" = String, Path), ("event_id" = String, Path), ValidateQuery),
    responses(
        (status = 200, description = "Registration created", body = LinkCreated),
        (status = 400, description = "User lacks a required pass", body = Error),
        (status = 404, description = "Unknown user or event, or user holds no pass", body = Error),
        (status = 409, description = "Already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUserEvent"
)]
#[post("/user/{user_id}/events/{event_id}")]
pub async fn create_user_event(
    state: web::Data<HttpState>,
    path: web::Path<(UserId, EventId)>,
    query: web::Query<ValidateQuery>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (user_id, event_id) = path.into_inner();
    links::create(
        &state,
        Link::user_event(user_id, event_id),
        query.into_inner().into(),
    )
    .await
}

#[utoipa::path(
    delete,
    path = "/user/{user_id}/events/{event_id}",
    params(("user_id" = String, Path), ("event_id" = String, Path)),
    responses(
        (status = 200, description = "Registration removed", body = LinkCreated),
        (status = 404, description = "No such registration", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUserEvent"
)]
#[delete("/user/{user_id}/events/{event_id}")]
pub async fn delete_user_event(
    state: web::Data<HttpState>,
    path: web::Path<(UserId, EventId)>,
) -> ApiResult<web::Json<LinkCreated>> {
    let (user_id, event_id) = path.into_inner();
    links::delete(&state, Link::user_event(user_id, event_id)).await
}

#[cfg(test)]
mod tests;
