//! Help-desk tickets raised by visitors.
//!
//! Tickets stand alone: they reference no other fest entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Error;
use super::ids::SupportTicketId;
use super::validation::{self, FieldValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupportTicketCategory {
    Contest,
    Event,
    Organization,
    Other,
    Passes,
    Payment,
    SpecialRequest,
    Website,
}

impl SupportTicketCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contest => "contest",
            Self::Event => "event",
            Self::Organization => "organization",
            Self::Other => "other",
            Self::Passes => "passes",
            Self::Payment => "payment",
            Self::SpecialRequest => "special_request",
            Self::Website => "website",
        }
    }
}

impl fmt::Display for SupportTicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown support ticket category: {0}")]
pub struct UnknownSupportTicketCategory(pub String);

impl FromStr for SupportTicketCategory {
    type Err = UnknownSupportTicketCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contest" => Ok(Self::Contest),
            "event" => Ok(Self::Event),
            "organization" => Ok(Self::Organization),
            "other" => Ok(Self::Other),
            "passes" => Ok(Self::Passes),
            "payment" => Ok(Self::Payment),
            "special_request" => Ok(Self::SpecialRequest),
            "website" => Ok(Self::Website),
            other => Err(UnknownSupportTicketCategory(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    #[schema(value_type = String)]
    pub id: SupportTicketId,
    pub name: String,
    pub description: String,
    pub category: SupportTicketCategory,
    pub timestamp: DateTime<Utc>,
    pub solved: bool,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Address of the volunteer who closed the ticket.
    #[serde(default)]
    pub solved_email_address: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicketDraft {
    pub name: String,
    pub description: String,
    pub category: SupportTicketCategory,
    /// Defaults to the time of creation.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SupportTicketDraft {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::non_empty("name", &self.name)?;
        validation::non_empty("description", &self.description)?;
        validation::optional(self.email_address.as_deref(), |v| {
            validation::email("emailAddress", v)
        })
    }

    /// New tickets always start unsolved.
    pub fn into_ticket(self, id: SupportTicketId, now: DateTime<Utc>) -> SupportTicket {
        SupportTicket {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            timestamp: self.timestamp.unwrap_or(now),
            solved: false,
            college_name: self.college_name,
            email_address: self.email_address,
            phone_number: self.phone_number,
            solved_email_address: None,
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SupportTicketPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<SupportTicketCategory>,
    pub college_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub comment: Option<String>,
    /// Manual override of the resolution flag.
    pub solved: Option<bool>,
    pub solved_email_address: Option<String>,
    #[serde(skip)]
    pub(crate) resolution: Option<SupportTicketResolution>,
}

impl SupportTicketPatch {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::optional(self.name.as_deref(), |v| validation::non_empty("name", v))?;
        validation::optional(self.description.as_deref(), |v| {
            validation::non_empty("description", v)
        })?;
        validation::optional(self.email_address.as_deref(), |v| {
            validation::email("emailAddress", v)
        })?;
        validation::optional(self.solved_email_address.as_deref(), |v| {
            validation::email("solvedEmailAddress", v)
        })
    }

    pub fn apply_to(&self, ticket: &mut SupportTicket) {
        if let Some(name) = &self.name {
            ticket.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            ticket.description.clone_from(description);
        }
        if let Some(category) = self.category {
            ticket.category = category;
        }
        if let Some(college_name) = &self.college_name {
            ticket.college_name = Some(college_name.clone());
        }
        if let Some(email_address) = &self.email_address {
            ticket.email_address = Some(email_address.clone());
        }
        if let Some(phone_number) = &self.phone_number {
            ticket.phone_number = Some(phone_number.clone());
        }
        if let Some(comment) = &self.comment {
            ticket.comment = Some(comment.clone());
        }
        if let Some(solved) = self.solved {
            ticket.solved = solved;
        }
        if let Some(solved_email_address) = &self.solved_email_address {
            ticket.solved_email_address = Some(solved_email_address.clone());
        }
        if let Some(resolution) = &self.resolution {
            ticket.solved = resolution.solved;
            ticket.solved_email_address = resolution.solved_email_address.clone();
        }
    }
}

/// Rejected combination of `solved` and `emailAddress` on the solve action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("an email address can only be recorded when marking a ticket solved")]
    EmailWithoutSolve,
    #[error(transparent)]
    Field(#[from] FieldValidationError),
}

impl From<ResolutionError> for Error {
    fn from(value: ResolutionError) -> Self {
        match value {
            ResolutionError::EmailWithoutSolve => Error::invalid_request(value.to_string())
                .with_details(serde_json::json!({
                    "field": "emailAddress",
                    "code": "email_without_solve",
                })),
            ResolutionError::Field(inner) => inner.into(),
        }
    }
}

/// Outcome of the solve action. Unlike a manual patch it always overwrites
/// the solver's address, clearing it when none is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportTicketResolution {
    solved: bool,
    solved_email_address: Option<String>,
}

impl SupportTicketResolution {
    /// Marking a ticket unsolved clears the solver's address.
    pub fn new(solved: bool, email_address: Option<String>) -> Result<Self, ResolutionError> {
        match (solved, email_address) {
            (false, Some(_)) => Err(ResolutionError::EmailWithoutSolve),
            (solved, Some(email)) => {
                validation::email("emailAddress", &email)?;
                Ok(Self {
                    solved,
                    solved_email_address: Some(email),
                })
            }
            (solved, None) => Ok(Self {
                solved,
                solved_email_address: None,
            }),
        }
    }

    pub fn solved(&self) -> bool {
        self.solved
    }

    pub fn into_patch(self) -> SupportTicketPatch {
        SupportTicketPatch {
            resolution: Some(self),
            ..SupportTicketPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ticket() -> SupportTicket {
        SupportTicketDraft {
            name: "Lost wristband".into(),
            description: "Dropped near the main stage".into(),
            category: SupportTicketCategory::Passes,
            timestamp: None,
            college_name: None,
            email_address: Some("visitor@example.com".into()),
            phone_number: None,
            comment: None,
        }
        .into_ticket(
            SupportTicketId::new("s1").expect("id"),
            Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).single().expect("time"),
        )
    }

    #[rstest]
    fn new_tickets_are_unsolved_and_timestamped(ticket: SupportTicket) {
        assert!(!ticket.solved);
        assert_eq!(ticket.timestamp.to_rfc3339(), "2026-02-14T10:00:00+00:00");
    }

    #[rstest]
    fn email_without_solve_is_rejected() {
        assert_eq!(
            SupportTicketResolution::new(false, Some("crew@example.com".into())),
            Err(ResolutionError::EmailWithoutSolve)
        );
    }

    #[rstest]
    fn solving_records_the_volunteer(mut ticket: SupportTicket) {
        let resolution =
            SupportTicketResolution::new(true, Some("crew@example.com".into())).expect("valid");
        resolution.into_patch().apply_to(&mut ticket);
        assert!(ticket.solved);
        assert_eq!(ticket.solved_email_address.as_deref(), Some("crew@example.com"));
    }

    #[rstest]
    fn reopening_clears_the_volunteer(mut ticket: SupportTicket) {
        ticket.solved = true;
        ticket.solved_email_address = Some("crew@example.com".into());
        SupportTicketResolution::new(false, None)
            .expect("valid")
            .into_patch()
            .apply_to(&mut ticket);
        assert!(!ticket.solved);
        assert!(ticket.solved_email_address.is_none());
    }

    #[rstest]
    fn manual_patch_can_mark_a_ticket_solved(mut ticket: SupportTicket) {
        let patch = SupportTicketPatch {
            solved: Some(true),
            solved_email_address: Some("crew@example.com".into()),
            ..SupportTicketPatch::default()
        };
        patch.validate().expect("valid patch");
        patch.apply_to(&mut ticket);
        assert!(ticket.solved);
        assert_eq!(ticket.solved_email_address.as_deref(), Some("crew@example.com"));
    }

    #[rstest]
    fn manual_patch_checks_the_solver_address() {
        let patch = SupportTicketPatch {
            solved_email_address: Some("crew".into()),
            ..SupportTicketPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[rstest]
    #[case(SupportTicketCategory::SpecialRequest, "special_request")]
    #[case(SupportTicketCategory::Website, "website")]
    fn category_round_trips_through_strings(
        #[case] category: SupportTicketCategory,
        #[case] raw: &str,
    ) {
        assert_eq!(category.as_str(), raw);
        assert_eq!(raw.parse::<SupportTicketCategory>(), Ok(category));
    }
}
