//! Association links between fest entities.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{EventId, LinkId, PassId, TeamId, UserId};

/// One association row, identified by its two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Link {
    /// Holding `pass_id` grants entry to `event_id`.
    PassEvent { pass_id: PassId, event_id: EventId },
    /// `user_id` is a member of `team_id`.
    TeamUser { team_id: TeamId, user_id: UserId },
    /// `team_id` is registered for `event_id`.
    TeamEvent { team_id: TeamId, event_id: EventId },
    /// `user_id` is registered directly for `event_id`.
    UserEvent { user_id: UserId, event_id: EventId },
}

impl Link {
    pub fn pass_event(pass_id: PassId, event_id: EventId) -> Self {
        Self::PassEvent { pass_id, event_id }
    }

    pub fn team_user(team_id: TeamId, user_id: UserId) -> Self {
        Self::TeamUser { team_id, user_id }
    }

    pub fn team_event(team_id: TeamId, event_id: EventId) -> Self {
        Self::TeamEvent { team_id, event_id }
    }

    pub fn user_event(user_id: UserId, event_id: EventId) -> Self {
        Self::UserEvent { user_id, event_id }
    }

    /// Short label used in logs and error details.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PassEvent { .. } => "pass_event",
            Self::TeamUser { .. } => "team_user",
            Self::TeamEvent { .. } => "team_event",
            Self::UserEvent { .. } => "user_event",
        }
    }

    /// Raw endpoint identifiers in `(parent, child)` order.
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Self::PassEvent { pass_id, event_id } => (pass_id.as_str(), event_id.as_str()),
            Self::TeamUser { team_id, user_id } => (team_id.as_str(), user_id.as_str()),
            Self::TeamEvent { team_id, event_id } => (team_id.as_str(), event_id.as_str()),
            Self::UserEvent { user_id, event_id } => (user_id.as_str(), event_id.as_str()),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (parent, child) = self.endpoints();
        write!(f, "{} link {parent} -> {child}", self.kind())
    }
}

/// Flags controlling eligibility checks on link creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkValidation {
    /// Run eligibility checks before inserting.
    pub validate: bool,
    /// For Team–Event links, check the host only.
    pub host_only: bool,
}

impl LinkValidation {
    pub const fn skip() -> Self {
        Self {
            validate: false,
            host_only: false,
        }
    }
}

impl Default for LinkValidation {
    fn default() -> Self {
        Self {
            validate: true,
            host_only: false,
        }
    }
}

/// Response body for link create and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LinkCreated {
    #[schema(value_type = String, example = "q9bL0v2mT3e8YwXhZ1aB4c")]
    pub id: LinkId,
}
