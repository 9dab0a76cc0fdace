//! Teams of participants, led by a host.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{TeamId, UserId};
use super::validation::{self, FieldValidationError};

/// A team registered for one or more events.
///
/// The host is also expected to be a member through a Team–User link, but
/// that link is created separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[schema(value_type = String)]
    pub id: TeamId,
    pub name: String,
    #[schema(value_type = String)]
    pub host_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamDraft {
    pub name: String,
    #[schema(value_type = String)]
    pub host_id: UserId,
}

impl TeamDraft {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::non_empty("name", &self.name)
    }

    pub fn into_team(self, id: TeamId) -> Team {
        Team {
            id,
            name: self.name,
            host_id: self.host_id,
        }
    }
}

/// Partial team update. Setting `host_id` transfers hosting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamPatch {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub host_id: Option<UserId>,
}

impl TeamPatch {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::optional(self.name.as_deref(), |v| validation::non_empty("name", v))
    }

    pub fn apply_to(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name.clone_from(name);
        }
        if let Some(host_id) = &self.host_id {
            team.host_id.clone_from(host_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_sets_host() {
        let team = TeamDraft {
            name: "Rustaceans".into(),
            host_id: UserId::new("h1").expect("id"),
        }
        .into_team(TeamId::new("t1").expect("id"));
        assert_eq!(team.host_id.as_str(), "h1");
    }

    #[rstest]
    fn patch_transfers_hosting() {
        let mut team = Team {
            id: TeamId::new("t1").expect("id"),
            name: "Rustaceans".into(),
            host_id: UserId::new("h1").expect("id"),
        };
        TeamPatch {
            host_id: Some(UserId::new("h2").expect("id")),
            ..TeamPatch::default()
        }
        .apply_to(&mut team);
        assert_eq!(team.host_id.as_str(), "h2");
        assert_eq!(team.name, "Rustaceans");
    }

    #[rstest]
    fn teams_cannot_be_read_without_a_host() {
        let hostless = serde_json::json!({"id": "t1", "name": "Orphans"});
        assert!(serde_json::from_value::<Team>(hostless).is_err());

        let hosted = serde_json::json!({"id": "t1", "name": "Orphans", "hostId": "h1"});
        let team: Team = serde_json::from_value(hosted).expect("team");
        assert_eq!(team.host_id.as_str(), "h1");
    }

    #[rstest]
    fn blank_name_is_rejected() {
        let patch = TeamPatch {
            name: Some(String::new()),
            host_id: None,
        };
        assert!(patch.validate().is_err());
    }
}
