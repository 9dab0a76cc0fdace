//! Fest events and their categories.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{EventId, UserId};
use super::validation::{self, FieldValidationError};

/// Broad grouping used on the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Cultural,
    ESports,
    Experiences,
    Finance,
    Hackathon,
    Other,
    ProShow,
    Robotics,
    Sports,
    Technical,
}

impl EventCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cultural => "cultural",
            Self::ESports => "e_sports",
            Self::Experiences => "experiences",
            Self::Finance => "finance",
            Self::Hackathon => "hackathon",
            Self::Other => "other",
            Self::ProShow => "pro_show",
            Self::Robotics => "robotics",
            Self::Sports => "sports",
            Self::Technical => "technical",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored category string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: {0}")]
pub struct UnknownEventCategory(pub String);

impl FromStr for EventCategory {
    type Err = UnknownEventCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cultural" => Ok(Self::Cultural),
            "e_sports" => Ok(Self::ESports),
            "experiences" => Ok(Self::Experiences),
            "finance" => Ok(Self::Finance),
            "hackathon" => Ok(Self::Hackathon),
            "other" => Ok(Self::Other),
            "pro_show" => Ok(Self::ProShow),
            "robotics" => Ok(Self::Robotics),
            "sports" => Ok(Self::Sports),
            "technical" => Ok(Self::Technical),
            other => Err(UnknownEventCategory(other.to_owned())),
        }
    }
}

/// A scheduled fest event.
///
/// The set of passes that grant entry is held as Pass–Event links rather
/// than on the event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[schema(value_type = String)]
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: EventCategory,
    /// Maximum team size for team events.
    #[serde(default)]
    pub team_members: Option<i32>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub organizer_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: EventCategory,
    #[serde(default)]
    pub team_members: Option<i32>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub organizer_id: Option<UserId>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::non_empty("name", &self.name)?;
        validation::optional(self.team_members.as_ref(), |v| {
            validation::positive("teamMembers", *v)
        })
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            team_members: self.team_members,
            start: self.start,
            venue: self.venue,
            organizer_id: self.organizer_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub team_members: Option<i32>,
    pub start: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    #[schema(value_type = Option<String>)]
    pub organizer_id: Option<UserId>,
}

impl EventPatch {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::optional(self.name.as_deref(), |v| validation::non_empty("name", v))?;
        validation::optional(self.team_members.as_ref(), |v| {
            validation::positive("teamMembers", *v)
        })
    }

    pub fn apply_to(&self, event: &mut Event) {
        if let Some(name) = &self.name {
            event.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(team_members) = self.team_members {
            event.team_members = Some(team_members);
        }
        if let Some(start) = self.start {
            event.start = Some(start);
        }
        if let Some(venue) = &self.venue {
            event.venue = Some(venue.clone());
        }
        if let Some(organizer_id) = &self.organizer_id {
            event.organizer_id = Some(organizer_id.clone());
        }
    }
}
