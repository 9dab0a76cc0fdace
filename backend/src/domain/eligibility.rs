//! Pass-based eligibility rules for joining events.
//!
//! An event with no linked passes is open to everyone. Otherwise a
//! participant is eligible when the pass they hold is one of the event's
//! linked passes. A missing prerequisite (a user without a pass, a team
//! without a host) is reported as an error rather than as ineligibility.
//!
//! These checks only read. Callers run them inside the same unit of work as
//! the write they guard.

use std::collections::HashSet;

use crate::domain::ports::{EligibilityReader, RepositoryError};
use crate::domain::{EventId, PassId, TeamId, UserId};

/// A prerequisite for the eligibility decision is missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("user {user_id} does not hold a pass")]
    MissingUserPass { user_id: UserId },
    #[error("team {team_id} has no host")]
    MissingHost { team_id: TeamId },
    #[error("host {host_id} of team {team_id} does not hold a pass")]
    MissingHostPass { team_id: TeamId, host_id: UserId },
    #[error("member {user_id} of team {team_id} does not hold a pass")]
    MissingMemberPass { team_id: TeamId, user_id: UserId },
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

async fn required_passes<R>(
    reader: &mut R,
    event_id: &EventId,
) -> Result<HashSet<PassId>, RepositoryError>
where
    R: EligibilityReader + ?Sized,
{
    Ok(reader.event_pass_ids(event_id).await?.into_iter().collect())
}

/// Whether `user_id` may take part in `event_id`.
///
/// Returns `Ok(true)` for unrestricted events without looking at the user.
pub async fn validate_user_for_event<R>(
    reader: &mut R,
    user_id: &UserId,
    event_id: &EventId,
) -> Result<bool, EligibilityError>
where
    R: EligibilityReader + ?Sized,
{
    let required = required_passes(reader, event_id).await?;
    if required.is_empty() {
        return Ok(true);
    }
    let pass_id = reader
        .user_pass_id(user_id)
        .await?
        .ok_or_else(|| EligibilityError::MissingUserPass {
            user_id: user_id.clone(),
        })?;
    Ok(required.contains(&pass_id))
}

/// Whether `team_id` may register for `event_id`.
///
/// With `host_only` the decision rests on the host's pass alone. Otherwise
/// the host and every other member must hold a linked pass; the first
/// ineligible participant short-circuits to `Ok(false)`.
pub async fn validate_team_for_event<R>(
    reader: &mut R,
    team_id: &TeamId,
    event_id: &EventId,
    host_only: bool,
) -> Result<bool, EligibilityError>
where
    R: EligibilityReader + ?Sized,
{
    let host_id = reader
        .team_host_id(team_id)
        .await?
        .ok_or_else(|| EligibilityError::MissingHost {
            team_id: team_id.clone(),
        })?;

    let required = required_passes(reader, event_id).await?;
    if required.is_empty() {
        return Ok(true);
    }

    let host_pass = reader
        .user_pass_id(&host_id)
        .await?
        .ok_or_else(|| EligibilityError::MissingHostPass {
            team_id: team_id.clone(),
            host_id: host_id.clone(),
        })?;
    let host_eligible = required.contains(&host_pass);
    if host_only || !host_eligible {
        return Ok(host_eligible);
    }

    for member_id in reader.team_member_ids(team_id).await? {
        if member_id == host_id {
            continue;
        }
        let member_pass = reader.user_pass_id(&member_id).await?.ok_or_else(|| {
            EligibilityError::MissingMemberPass {
                team_id: team_id.clone(),
                user_id: member_id.clone(),
            }
        })?;
        if !required.contains(&member_pass) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
#[path = "eligibility_tests.rs"]
mod tests;
