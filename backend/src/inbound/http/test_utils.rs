//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::App;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;

use crate::domain::ports::{EventRepository, PassRepository, TeamRepository, UserRepository};
use crate::domain::{
    Event, EventCategory, EventId, Link, LinkValidation, Pass, PassId, Team, TeamId, User, UserId,
};
use crate::domain::ports::AssociationCommand;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure, validation};
use crate::test_support::{InMemoryFestStore, in_memory_http_state};

/// Clock pinned to a single instant.
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fest_opening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 6, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixed_state(store: &InMemoryFestStore) -> HttpState {
    in_memory_http_state(store).with_clock(Arc::new(FixedClock(fest_opening())))
}

/// Application with every fest route and the JSON extractor configuration.
pub(crate) fn fest_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .configure(configure)
}

pub(crate) async fn seed_pass(store: &InMemoryFestStore, id: &str) -> Pass {
    let pass = Pass {
        id: PassId::new(id).expect("pass id"),
        name: format!("Pass {id}"),
        description: None,
        cost: Decimal::new(49900, 2),
    };
    PassRepository::create(store, &pass).await.expect("seed pass");
    pass
}

pub(crate) async fn seed_user(store: &InMemoryFestStore, id: &str, pass: Option<&str>) -> User {
    let user = User {
        id: UserId::new(id).expect("user id"),
        first_name: id.to_uppercase(),
        last_name: "Tester".into(),
        email_address: format!("{id}@fest.example"),
        phone_number: None,
        registration_number: None,
        pass_id: pass.map(|p| PassId::new(p).expect("pass id")),
    };
    UserRepository::create(store, &user).await.expect("seed user");
    user
}

pub(crate) async fn seed_event(store: &InMemoryFestStore, id: &str, passes: &[&str]) -> Event {
    let event = Event {
        id: EventId::new(id).expect("event id"),
        name: format!("Event {id}"),
        description: None,
        category: EventCategory::Technical,
        team_members: Some(4),
        start: Some(fest_opening()),
        venue: None,
        organizer_id: None,
    };
    EventRepository::create(store, &event).await.expect("seed event");
    for pass in passes {
        link(
            store,
            Link::pass_event(PassId::new(*pass).expect("pass id"), event.id.clone()),
        )
        .await;
    }
    event
}

/// Create a team hosted by `host`, who also becomes a member.
pub(crate) async fn seed_team(store: &InMemoryFestStore, id: &str, host: &str) -> Team {
    let team = Team {
        id: TeamId::new(id).expect("team id"),
        name: format!("Team {id}"),
        host_id: UserId::new(host).expect("user id"),
    };
    TeamRepository::create(store, &team).await.expect("seed team");
    link(
        store,
        Link::team_user(team.id.clone(), UserId::new(host).expect("user id")),
    )
    .await;
    team
}

pub(crate) async fn link(store: &InMemoryFestStore, link: Link) {
    let service = crate::domain::AssociationService::new(Arc::new(store.clone()));
    AssociationCommand::create_link(&service, link, LinkValidation::skip())
        .await
        .expect("seed link");
}
