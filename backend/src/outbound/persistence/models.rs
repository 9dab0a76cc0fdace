//! Internal Diesel row structs and their domain conversions.
//!
//! Rows never leave the persistence layer. Reading a row back validates its
//! identifiers and category strings so corrupt data surfaces as a query error
//! instead of a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    Event, EventId, IdValidationError, Pass, PassId, SupportTicket, SupportTicketId, Team,
    TeamId, UnknownEventCategory, UnknownSupportTicketCategory, User, UserId,
};

use super::schema::{events, passes, support_tickets, teams, users};

/// A stored row could not be mapped onto a domain type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("stored identifier is invalid: {0}")]
    Id(#[from] IdValidationError),
    #[error(transparent)]
    EventCategory(#[from] UnknownEventCategory),
    #[error(transparent)]
    SupportTicketCategory(#[from] UnknownSupportTicketCategory),
}

/// Convert a batch of rows, failing on the first invalid one.
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, RowConversionError>
where
    T: TryFrom<R, Error = RowConversionError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Parse stored identifiers into typed ids.
pub(crate) fn parse_ids<T>(raw: Vec<String>) -> Result<Vec<T>, RowConversionError>
where
    T: TryFrom<String, Error = IdValidationError>,
{
    raw.into_iter()
        .map(|id| T::try_from(id).map_err(RowConversionError::from))
        .collect()
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub registration_number: Option<i64>,
    pub pass_id: Option<String>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.clone(),
            phone_number: user.phone_number.clone(),
            registration_number: user.registration_number,
            pass_id: user.pass_id.as_ref().map(ToString::to_string),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id)?,
            first_name: row.first_name,
            last_name: row.last_name,
            email_address: row.email_address,
            phone_number: row.phone_number,
            registration_number: row.registration_number,
            pass_id: row.pass_id.map(PassId::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = passes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PassRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cost: Decimal,
}

impl From<&Pass> for PassRow {
    fn from(pass: &Pass) -> Self {
        Self {
            id: pass.id.to_string(),
            name: pass.name.clone(),
            description: pass.description.clone(),
            cost: pass.cost,
        }
    }
}

impl TryFrom<PassRow> for Pass {
    type Error = RowConversionError;

    fn try_from(row: PassRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PassId::new(row.id)?,
            name: row.name,
            description: row.description,
            cost: row.cost,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EventRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub team_members: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub organizer_id: Option<String>,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            description: event.description.clone(),
            category: event.category.as_str().to_owned(),
            team_members: event.team_members,
            starts_at: event.start,
            venue: event.venue.clone(),
            organizer_id: event.organizer_id.as_ref().map(ToString::to_string),
        }
    }
}

impl TryFrom<EventRow> for Event {
    type Error = RowConversionError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::new(row.id)?,
            name: row.name,
            description: row.description,
            category: row.category.parse()?,
            team_members: row.team_members,
            start: row.starts_at,
            venue: row.venue,
            organizer_id: row.organizer_id.map(UserId::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeamRow {
    pub id: String,
    pub name: String,
    pub host_id: String,
}

pub(crate) fn team_row(team: &Team) -> TeamRow {
    TeamRow {
        id: team.id.to_string(),
        name: team.name.clone(),
        host_id: team.host_id.to_string(),
    }
}

impl TryFrom<TeamRow> for Team {
    type Error = RowConversionError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TeamId::new(row.id)?,
            name: row.name,
            host_id: UserId::new(row.host_id)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = support_tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SupportTicketRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub raised_at: DateTime<Utc>,
    pub solved: bool,
    pub college_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub solved_email_address: Option<String>,
    pub comment: Option<String>,
}

impl From<&SupportTicket> for SupportTicketRow {
    fn from(ticket: &SupportTicket) -> Self {
        Self {
            id: ticket.id.to_string(),
            name: ticket.name.clone(),
            description: ticket.description.clone(),
            category: ticket.category.as_str().to_owned(),
            raised_at: ticket.timestamp,
            solved: ticket.solved,
            college_name: ticket.college_name.clone(),
            email_address: ticket.email_address.clone(),
            phone_number: ticket.phone_number.clone(),
            solved_email_address: ticket.solved_email_address.clone(),
            comment: ticket.comment.clone(),
        }
    }
}

impl TryFrom<SupportTicketRow> for SupportTicket {
    type Error = RowConversionError;

    fn try_from(row: SupportTicketRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SupportTicketId::new(row.id)?,
            name: row.name,
            description: row.description,
            category: row.category.parse()?,
            timestamp: row.raised_at,
            solved: row.solved,
            college_name: row.college_name,
            email_address: row.email_address,
            phone_number: row.phone_number,
            solved_email_address: row.solved_email_address,
            comment: row.comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventCategory, SupportTicketCategory};
    use rstest::rstest;

    #[rstest]
    fn user_rows_carry_optional_pass() {
        let row = UserRow {
            id: "3fKx9aZ".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
            phone_number: None,
            registration_number: Some(7),
            pass_id: Some("p1".into()),
        };
        let user = User::try_from(row).expect("valid row");
        assert_eq!(user.pass_id.as_ref().map(PassId::as_str), Some("p1"));
        assert_eq!(UserRow::from(&user).pass_id.as_deref(), Some("p1"));
    }

    #[rstest]
    fn unknown_category_is_a_conversion_error() {
        let row = EventRow {
            id: "e1".into(),
            name: "Quiz".into(),
            description: None,
            category: "quiz".into(),
            team_members: None,
            starts_at: None,
            venue: None,
            organizer_id: None,
        };
        assert!(matches!(
            Event::try_from(row),
            Err(RowConversionError::EventCategory(_))
        ));
    }

    #[rstest]
    fn event_category_is_stored_in_snake_case() {
        let event = Event {
            id: EventId::new("e1").expect("id"),
            name: "Finale".into(),
            description: None,
            category: EventCategory::ProShow,
            team_members: None,
            start: None,
            venue: None,
            organizer_id: None,
        };
        assert_eq!(EventRow::from(&event).category, "pro_show");
    }

    #[rstest]
    fn blank_stored_id_is_rejected() {
        let row = SupportTicketRow {
            id: String::new(),
            name: "Help".into(),
            description: "Lost".into(),
            category: SupportTicketCategory::Other.as_str().into(),
            raised_at: Utc::now(),
            solved: false,
            college_name: None,
            email_address: None,
            phone_number: None,
            solved_email_address: None,
            comment: None,
        };
        assert!(matches!(
            SupportTicket::try_from(row),
            Err(RowConversionError::Id(_))
        ));
    }
}
