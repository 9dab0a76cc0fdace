//! Tests for the association service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use rust_decimal::Decimal;

use super::*;
use crate::domain::ports::{
    EventRepository, PassRepository, RepositoryError, TeamRepository, UserRepository,
};
use crate::domain::{
    ErrorCode, Event, EventCategory, Pass, PassId, Team, TeamId, User, UserId,
};
use crate::test_support::InMemoryFestStore;

fn user_id(id: &str) -> UserId {
    UserId::new(id).expect("user id")
}

fn pass_id(id: &str) -> PassId {
    PassId::new(id).expect("pass id")
}

fn event_id(id: &str) -> EventId {
    EventId::new(id).expect("event id")
}

fn team_id(id: &str) -> TeamId {
    TeamId::new(id).expect("team id")
}

async fn add_user(store: &InMemoryFestStore, id: &str, pass: Option<&str>) {
    let user = User {
        id: user_id(id),
        first_name: id.to_owned(),
        last_name: "Tester".into(),
        email_address: format!("{id}@example.com"),
        phone_number: None,
        registration_number: None,
        pass_id: pass.map(pass_id),
    };
    UserRepository::create(store, &user).await.expect("user");
}

async fn add_event(store: &InMemoryFestStore, id: &str, passes: &[&str]) {
    let event = Event {
        id: event_id(id),
        name: format!("Event {id}"),
        description: None,
        category: EventCategory::Technical,
        team_members: None,
        start: None,
        venue: None,
        organizer_id: None,
    };
    EventRepository::create(store, &event).await.expect("event");
    let service = AssociationService::new(Arc::new(store.clone()));
    for pass in passes {
        service
            .create_link(Link::pass_event(pass_id(pass), event_id(id)), LinkValidation::default())
            .await
            .expect("pass link");
    }
}

/// Passes P1..P3; event E requires {P1, P2}; event OPEN is unrestricted.
/// U holds P1, V holds P3, W holds nothing. Team T is hosted by U with
/// member V.
#[fixture]
async fn fest() -> InMemoryFestStore {
    let store = InMemoryFestStore::new();
    for id in ["P1", "P2", "P3"] {
        let pass = Pass {
            id: pass_id(id),
            name: id.to_owned(),
            description: None,
            cost: Decimal::ONE_HUNDRED,
        };
        PassRepository::create(&store, &pass).await.expect("pass");
    }
    add_user(&store, "U", Some("P1")).await;
    add_user(&store, "V", Some("P3")).await;
    add_user(&store, "W", None).await;
    add_event(&store, "E", &["P1", "P2"]).await;
    add_event(&store, "OPEN", &[]).await;
    let team = Team {
        id: team_id("T"),
        name: "Rustaceans".into(),
        host_id: user_id("U"),
    };
    TeamRepository::create(&store, &team).await.expect("team");

    let service = service(&store);
    for member in ["U", "V"] {
        service
            .create_link(Link::team_user(team_id("T"), user_id(member)), LinkValidation::default())
            .await
            .expect("member");
    }
    store
}

fn service(store: &InMemoryFestStore) -> AssociationService<InMemoryFestStore> {
    AssociationService::new(Arc::new(store.clone()))
}

#[rstest]
#[tokio::test]
async fn eligible_user_is_registered(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let link = Link::user_event(user_id("U"), event_id("E"));
    let id = service(&store)
        .create_link(link.clone(), LinkValidation::default())
        .await
        .expect("created");
    assert_eq!(id.as_str().len(), 22);
    assert!(store.contains_link(&link));
}

#[rstest]
#[tokio::test]
async fn ineligible_user_is_rejected_without_a_row(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let link = Link::user_event(user_id("V"), event_id("E"));
    let err = service(&store)
        .create_link(link.clone(), LinkValidation::default())
        .await
        .expect_err("ineligible");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d["code"].as_str()),
        Some("ineligible_pass")
    );
    assert!(!store.contains_link(&link));
}

#[rstest]
#[tokio::test]
async fn user_without_pass_is_not_found(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let err = service(&store)
        .create_link(
            Link::user_event(user_id("W"), event_id("E")),
            LinkValidation::default(),
        )
        .await
        .expect_err("missing pass");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.details().and_then(|d| d["code"].as_str()),
        Some("missing_pass")
    );
}

#[rstest]
#[tokio::test]
async fn skipping_validation_admits_anyone(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let link = Link::user_event(user_id("W"), event_id("E"));
    service(&store)
        .create_link(link.clone(), LinkValidation::skip())
        .await
        .expect("created");
    assert!(store.contains_link(&link));
}

#[rstest]
#[case(false, false)]
#[case(true, true)]
#[tokio::test]
async fn team_registration_honours_host_only(
    #[future] fest: InMemoryFestStore,
    #[case] host_only: bool,
    #[case] admitted: bool,
) {
    let store = fest.await;
    let link = Link::team_event(team_id("T"), event_id("E"));
    let result = service(&store)
        .create_link(
            link.clone(),
            LinkValidation {
                validate: true,
                host_only,
            },
        )
        .await;
    assert_eq!(result.is_ok(), admitted);
    assert_eq!(store.contains_link(&link), admitted);
}

#[rstest]
#[tokio::test]
async fn ineligible_candidate_cannot_join_registered_team(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    add_user(&store, "X", Some("P3")).await;
    let service = service(&store);
    service
        .create_link(
            Link::team_event(team_id("T"), event_id("E")),
            LinkValidation {
                validate: true,
                host_only: true,
            },
        )
        .await
        .expect("registered");

    let membership = Link::team_user(team_id("T"), user_id("X"));
    let err = service
        .create_link(membership.clone(), LinkValidation::default())
        .await
        .expect_err("ineligible member");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(!store.contains_link(&membership));
}

#[rstest]
#[tokio::test]
async fn candidate_for_unregistered_team_joins_freely(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    add_user(&store, "X", None).await;
    service(&store)
        .create_link(
            Link::team_user(team_id("T"), user_id("X")),
            LinkValidation::default(),
        )
        .await
        .expect("joined");
}

#[rstest]
#[tokio::test]
async fn duplicate_link_is_a_conflict(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let err = service(&store)
        .create_link(
            Link::team_user(team_id("T"), user_id("V")),
            LinkValidation::skip(),
        )
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn delete_then_recreate_issues_new_id(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let service = service(&store);
    let link = Link::user_event(user_id("U"), event_id("OPEN"));
    let first = service
        .create_link(link.clone(), LinkValidation::default())
        .await
        .expect("created");
    let deleted = service.delete_link(link.clone()).await.expect("deleted");
    assert_eq!(deleted, first);
    assert!(!store.contains_link(&link));

    let second = service
        .create_link(link, LinkValidation::default())
        .await
        .expect("recreated");
    assert_ne!(first, second);
}

#[rstest]
#[tokio::test]
async fn deleting_missing_link_is_not_found(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let err = service(&store)
        .delete_link(Link::user_event(user_id("W"), event_id("OPEN")))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn deleting_pass_event_link_skips_revalidation(#[future] fest: InMemoryFestStore) {
    let store = fest.await;
    let service = service(&store);
    service
        .create_link(
            Link::user_event(user_id("U"), event_id("E")),
            LinkValidation::default(),
        )
        .await
        .expect("registered");
    service
        .delete_link(Link::pass_event(pass_id("P1"), event_id("E")))
        .await
        .expect("restriction removed");
    assert!(store.contains_link(&Link::user_event(user_id("U"), event_id("E"))));
}

struct UnavailableUnits;

#[async_trait]
impl UnitOfWorkProvider for UnavailableUnits {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        Err(RepositoryError::connection("pool timed out"))
    }
}

#[tokio::test]
async fn unavailable_database_maps_to_service_unavailable() {
    let service = AssociationService::new(Arc::new(UnavailableUnits));
    let err = service
        .create_link(
            Link::user_event(user_id("U"), event_id("E")),
            LinkValidation::default(),
        )
        .await
        .expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
