//! Handler tests for the user endpoints.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::UserRepository;
use crate::domain::{ErrorCode, Link, LinkCreated, TeamId, UserId};
use crate::inbound::http::test_utils::{
    fest_app, fixed_state, link, seed_event, seed_pass, seed_team, seed_user,
};
use crate::test_support::InMemoryFestStore;

use super::*;

#[rstest]
#[actix_web::test]
async fn create_user_returns_generated_id() {
    let store = InMemoryFestStore::new();
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "emailAddress": "ada@fest.example",
            "registrationNumber": 220911
        }))
        .to_request();
    let user: User = test::call_and_read_body_json(&app, req).await;

    assert_eq!(user.first_name, "Ada");
    assert!(!user.id.as_str().is_empty());
    let stored = UserRepository::find_by_id(&store, &user.id)
        .await
        .expect("lookup");
    assert_eq!(stored, Some(user));
}

#[rstest]
#[actix_web::test]
async fn create_user_rejects_blank_name() {
    let store = InMemoryFestStore::new();
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "firstName": "  ",
            "lastName": "Lovelace",
            "emailAddress": "ada@fest.example"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(body.details(), Some(&json!({"field": "firstName", "code": "empty"})));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "u1", None).await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "firstName": "Copy",
            "lastName": "Cat",
            "emailAddress": "u1@fest.example"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[rstest]
#[actix_web::test]
async fn id_lookups_are_not_captured_by_the_id_route() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "u1", None).await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::get()
        .uri("/user/id?emailAddress=u1@fest.example")
        .to_request();
    let id: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(id, json!("u1"));

    let req = test::TestRequest::get()
        .uri("/user/id?emailAddress=nobody@fest.example")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn patch_merges_only_provided_fields() {
    let store = InMemoryFestStore::new();
    seed_pass(&store, "p1").await;
    seed_user(&store, "u1", None).await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::patch()
        .uri("/user/u1")
        .set_json(json!({"passId": "p1"}))
        .to_request();
    let user: User = test::call_and_read_body_json(&app, req).await;

    assert_eq!(user.first_name, "U1");
    assert_eq!(user.pass_id.as_ref().map(|id| id.as_str()), Some("p1"));
}

#[rstest]
#[actix_web::test]
async fn user_without_pass_has_no_pass_resource() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "u1", None).await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::get().uri("/user/u1/pass").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn registering_for_an_event_checks_the_pass() {
    let store = InMemoryFestStore::new();
    seed_pass(&store, "p1").await;
    seed_pass(&store, "p3").await;
    seed_user(&store, "u1", Some("p1")).await;
    seed_user(&store, "v1", Some("p3")).await;
    seed_event(&store, "e1", &["p1"]).await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let ok = test::TestRequest::post().uri("/user/u1/events/e1").to_request();
    let created: LinkCreated = test::call_and_read_body_json(&app, ok).await;
    assert!(!created.id.as_str().is_empty());

    let denied = test::TestRequest::post().uri("/user/v1/events/e1").to_request();
    let res = test::call_service(&app, denied).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);

    let skipped = test::TestRequest::post()
        .uri("/user/v1/events/e1?validate=false")
        .to_request();
    let res = test::call_service(&app, skipped).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn host_membership_cannot_be_removed() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "h1", None).await;
    seed_team(&store, "t1", "h1").await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::delete().uri("/user/h1/teams/t1").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(store.contains_link(&Link::team_user(
        TeamId::new("t1").expect("id"),
        UserId::new("h1").expect("id"),
    )));
}

#[rstest]
#[actix_web::test]
async fn members_can_leave_and_rejoin_with_a_new_link_id() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "h1", None).await;
    seed_user(&store, "m1", None).await;
    seed_team(&store, "t1", "h1").await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let join = || test::TestRequest::post().uri("/user/m1/teams/t1").to_request();
    let first: LinkCreated = test::call_and_read_body_json(&app, join()).await;

    let leave = test::TestRequest::delete().uri("/user/m1/teams/t1").to_request();
    let removed: LinkCreated = test::call_and_read_body_json(&app, leave).await;
    assert_eq!(removed.id, first.id);

    let second: LinkCreated = test::call_and_read_body_json(&app, join()).await;
    assert_ne!(second.id, first.id);
}

#[rstest]
#[actix_web::test]
async fn teams_lists_hosted_or_joined() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "h1", None).await;
    seed_user(&store, "m1", None).await;
    seed_team(&store, "t1", "h1").await;
    seed_team(&store, "t2", "m1").await;
    link(
        &store,
        Link::team_user(TeamId::new("t1").expect("id"), UserId::new("m1").expect("id")),
    )
    .await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let hosted: Vec<Team> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/user/m1/teams?host=true").to_request(),
    )
    .await;
    let joined: Vec<Team> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/user/m1/teams?host=false").to_request(),
    )
    .await;

    let names = |teams: &[Team]| {
        let mut ids: Vec<String> = teams.iter().map(|t| t.id.to_string()).collect();
        ids.sort();
        ids
    };
    assert_eq!(names(&hosted), vec!["t2"]);
    assert_eq!(names(&joined), vec!["t1", "t2"]);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_user_returns_the_record() {
    let store = InMemoryFestStore::new();
    seed_user(&store, "u1", None).await;
    let app = test::init_service(fest_app(fixed_state(&store))).await;

    let req = test::TestRequest::delete().uri("/user/u1").to_request();
    let user: User = test::call_and_read_body_json(&app, req).await;
    assert_eq!(user.id.as_str(), "u1");

    let again = test::TestRequest::get().uri("/user/u1").to_request();
    let res = test::call_service(&app, again).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
