//! Event endpoints.
//!
//! ```text
//! GET    /event
//! POST   /event
//! GET    /event/{event_id}
//! PATCH  /event/{event_id}
//! DELETE /event/{event_id}
//! GET    /event/{event_id}/passes
//! GET    /event/{event_id}/teams
//! GET    /event/{event_id}/users
//! ```
//!
//! Links to passes, teams and users are created from the other side of each
//! association.

use actix_web::{delete, get, patch, post, web};
use tracing::info;

use crate::domain::{Error, Event, EventDraft, EventId, EventPatch, Pass, Team, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::missing;
use crate::inbound::http::state::HttpState;

async fn require_event(state: &HttpState, id: &EventId) -> ApiResult<Event> {
    state
        .events
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("event", id))
}

#[utoipa::path(
    get,
    path = "/event",
    responses((status = 200, description = "The full schedule", body = [Event])),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/event")]
pub async fn list_events(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Event>>> {
    Ok(web::Json(state.events.list_all().await?))
}

#[utoipa::path(
    post,
    path = "/event",
    request_body = EventDraft,
    responses(
        (status = 200, description = "Created event", body = Event),
        (status = 400, description = "Invalid event", body = Error),
        (status = 404, description = "Organiser does not exist", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/event")]
pub async fn create_event(
    state: web::Data<HttpState>,
    payload: web::Json<EventDraft>,
) -> ApiResult<web::Json<Event>> {
    let draft = payload.into_inner();
    draft.validate()?;
    let event = draft.into_event(EventId::generate());
    state.events.create(&event).await?;
    info!(event_id = %event.id, category = %event.category, "event scheduled");
    Ok(web::Json(event))
}

#[utoipa::path(
    get,
    path = "/event/{event_id}",
    params(("event_id" = String, Path)),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Unknown event", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEvent"
)]
#[get("/event/{event_id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<web::Json<Event>> {
    require_event(&state, &path.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    patch,
    path = "/event/{event_id}",
    params(("event_id" = String, Path)),
    request_body = EventPatch,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, description = "Invalid field", body = Error),
        (status = 404, description = "Unknown event or organiser", body = Error)
    ),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[patch("/event/{event_id}")]
pub async fn update_event(
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
    payload: web::Json<EventPatch>,
) -> ApiResult<web::Json<Event>> {
    let id = path.into_inner();
    let patch = payload.into_inner();
    patch.validate()?;
    state
        .events
        .update(&id, &patch)
        .await?
        .map(web::Json)
        .ok_or_else(|| missing("event", &id))
}

#[utoipa::path(
    delete,
    path = "/event/{event_id}",
    params(("event_id" = String, Path)),
    responses(
        (status = 200, description = "Deleted event", body = Event),
        (status = 404, description = "Unknown event", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/event/{event_id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<web::Json<Event>> {
    let id = path.into_inner();
    let event = state
        .events
        .delete(&id)
        .await?
        .ok_or_else(|| missing("event", &id))?;
    info!(event_id = %id, "event cancelled");
    Ok(web::Json(event))
}

#[utoipa::path(
    get,
    path = "/event/{event_id}/passes",
    params(("event_id" = String, Path)),
    responses(
        (status = 200, description = "Passes granting entry", body = [Pass]),
        (status = 404, description = "Unknown event", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEventPasses"
)]
#[get("/event/{event_id}/passes")]
pub async fn get_event_passes(
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<web::Json<Vec<Pass>>> {
    let event = require_event(&state, &path.into_inner()).await?;
    let ids = state.associations.event_pass_ids(&event.id).await?;
    Ok(web::Json(state.passes.find_by_ids(&ids).await?))
}

#[utoipa::path(
    get,
    path = "/event/{event_id}/teams",
    params(("event_id" = String, Path)),
    responses(
        (status = 200, description = "Registered teams", body = [Team]),
        (status = 404, description = "Unknown event", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEventTeams"
)]
#[get("/event/{event_id}/teams")]
pub async fn get_event_teams(
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<web::Json<Vec<Team>>> {
    let event = require_event(&state, &path.into_inner()).await?;
    let ids = state.associations.event_team_ids(&event.id).await?;
    Ok(web::Json(state.teams.find_by_ids(&ids).await?))
}

#[utoipa::path(
    get,
    path = "/event/{event_id}/users",
    params(("event_id" = String, Path)),
    responses(
        (status = 200, description = "Individually registered users", body = [User]),
        (status = 404, description = "Unknown event", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEventUsers"
)]
#[get("/event/{event_id}/users")]
pub async fn get_event_users(
    state: web::Data<HttpState>,
    path: web::Path<EventId>,
) -> ApiResult<web::Json<Vec<User>>> {
    let event = require_event(&state, &path.into_inner()).await?;
    let ids = state.associations.event_user_ids(&event.id).await?;
    Ok(web::Json(state.users.find_by_ids(&ids).await?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{EventCategory, Link, PassId, TeamId, UserId};
    use crate::inbound::http::test_utils::{
        fest_app, fixed_state, link, seed_event, seed_pass, seed_team, seed_user,
    };
    use crate::test_support::InMemoryFestStore;

    #[rstest]
    #[actix_web::test]
    async fn create_event_accepts_snake_case_category() {
        let store = InMemoryFestStore::new();
        let app = test::init_service(fest_app(fixed_state(&store))).await;

        let req = test::TestRequest::post()
            .uri("/event")
            .set_json(json!({
                "name": "Robo Wars",
                "category": "robotics",
                "teamMembers": 5,
                "start": "2026-03-07T10:00:00Z",
                "venue": "Main arena"
            }))
            .to_request();
        let event: Event = test::call_and_read_body_json(&app, req).await;

        assert_eq!(event.category, EventCategory::Robotics);
        assert_eq!(event.team_members, Some(5));
    }

    #[rstest]
    #[case(json!({"name": "Robo Wars", "category": "knitting"}))]
    #[case(json!({"name": "Robo Wars", "category": "robotics", "teamMembers": 0}))]
    #[actix_web::test]
    async fn malformed_events_are_rejected(#[case] body: serde_json::Value) {
        let store = InMemoryFestStore::new();
        let app = test::init_service(fest_app(fixed_state(&store))).await;

        let req = test::TestRequest::post().uri("/event").set_json(body).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_organiser_is_not_found() {
        let store = InMemoryFestStore::new();
        let app = test::init_service(fest_app(fixed_state(&store))).await;

        let req = test::TestRequest::post()
            .uri("/event")
            .set_json(json!({"name": "Quiz", "category": "other", "organizerId": "ghost"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn reverse_listings_follow_links() {
        let store = InMemoryFestStore::new();
        seed_pass(&store, "p1").await;
        seed_user(&store, "u1", Some("p1")).await;
        seed_event(&store, "e1", &["p1"]).await;
        seed_team(&store, "t1", "u1").await;
        link(
            &store,
            Link::user_event(UserId::new("u1").expect("id"), EventId::new("e1").expect("id")),
        )
        .await;
        link(
            &store,
            Link::team_event(TeamId::new("t1").expect("id"), EventId::new("e1").expect("id")),
        )
        .await;
        let app = test::init_service(fest_app(fixed_state(&store))).await;

        let passes: Vec<Pass> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/event/e1/passes").to_request(),
        )
        .await;
        let teams: Vec<Team> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/event/e1/teams").to_request(),
        )
        .await;
        let users: Vec<User> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/event/e1/users").to_request(),
        )
        .await;

        assert_eq!(passes[0].id, PassId::new("p1").expect("id"));
        assert_eq!(teams.len(), 1);
        assert_eq!(users.len(), 1);
    }

    #[rstest]
    #[actix_web::test]
    async fn patch_keeps_unset_fields() {
        let store = InMemoryFestStore::new();
        seed_event(&store, "e1", &[]).await;
        let app = test::init_service(fest_app(fixed_state(&store))).await;

        let req = test::TestRequest::patch()
            .uri("/event/e1")
            .set_json(json!({"venue": "Open air theatre"}))
            .to_request();
        let event: Event = test::call_and_read_body_json(&app, req).await;

        assert_eq!(event.venue.as_deref(), Some("Open air theatre"));
        assert_eq!(event.name, "Event e1");
        assert_eq!(event.category, EventCategory::Technical);
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_an_unknown_event_is_not_found() {
        let store = InMemoryFestStore::new();
        let app = test::init_service(fest_app(fixed_state(&store))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/event/e9/users").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
