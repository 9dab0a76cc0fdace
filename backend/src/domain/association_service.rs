//! Association service implementing the [`AssociationCommand`] driving port.
//!
//! Every operation runs in its own unit of work: eligibility reads and the
//! link write share one transaction, which commits on success and rolls
//! back on any failure.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::eligibility::{
    EligibilityError, validate_team_for_event, validate_user_for_event,
};
use crate::domain::ports::{AssociationCommand, UnitOfWork, UnitOfWorkProvider};
use crate::domain::{Error, EventId, Link, LinkId, LinkValidation};

/// Creates and removes association links.
#[derive(Clone)]
pub struct AssociationService<P> {
    units: Arc<P>,
}

impl<P> AssociationService<P> {
    pub fn new(units: Arc<P>) -> Self {
        Self { units }
    }
}

fn map_eligibility_error(error: EligibilityError) -> Error {
    let code = match error {
        EligibilityError::Persistence(inner) => return inner.into(),
        EligibilityError::MissingHost { .. } => "missing_host",
        EligibilityError::MissingUserPass { .. }
        | EligibilityError::MissingHostPass { .. }
        | EligibilityError::MissingMemberPass { .. } => "missing_pass",
    };
    Error::not_found(error.to_string()).with_details(json!({ "code": code }))
}

fn ineligible(subject: &str, event_id: &EventId, link: &Link) -> Error {
    Error::invalid_request(format!("{subject} is not eligible for event {event_id}"))
        .with_details(json!({
            "code": "ineligible_pass",
            "link": link.kind(),
            "subject": subject,
            "eventId": event_id,
        }))
}

/// Run the checks selected by `validation` against `link`.
async fn check_eligibility(
    uow: &mut dyn UnitOfWork,
    link: &Link,
    validation: LinkValidation,
) -> Result<(), Error> {
    if !validation.validate {
        return Ok(());
    }
    match link {
        Link::PassEvent { .. } => Ok(()),
        Link::UserEvent { user_id, event_id } => {
            let eligible = validate_user_for_event(uow, user_id, event_id)
                .await
                .map_err(map_eligibility_error)?;
            if eligible {
                Ok(())
            } else {
                Err(ineligible(&format!("user {user_id}"), event_id, link))
            }
        }
        Link::TeamEvent { team_id, event_id } => {
            let eligible = validate_team_for_event(uow, team_id, event_id, validation.host_only)
                .await
                .map_err(map_eligibility_error)?;
            if eligible {
                Ok(())
            } else {
                Err(ineligible(&format!("team {team_id}"), event_id, link))
            }
        }
        Link::TeamUser { team_id, user_id } => {
            let event_ids = uow.team_event_ids(team_id).await?;
            for event_id in &event_ids {
                let eligible = validate_user_for_event(uow, user_id, event_id)
                    .await
                    .map_err(map_eligibility_error)?;
                if !eligible {
                    return Err(ineligible(&format!("user {user_id}"), event_id, link));
                }
            }
            Ok(())
        }
    }
}

async fn abandon(uow: Box<dyn UnitOfWork>, link: &Link) {
    if let Err(err) = uow.rollback().await {
        warn!(link = %link, error = %err, "rollback failed; connection will be discarded");
    }
}

#[async_trait]
impl<P> AssociationCommand for AssociationService<P>
where
    P: UnitOfWorkProvider,
{
    async fn create_link(&self, link: Link, validation: LinkValidation) -> Result<LinkId, Error> {
        let mut uow = self.units.begin().await?;

        if let Err(err) = check_eligibility(uow.as_mut(), &link, validation).await {
            info!(link = %link, code = ?err.code(), reason = %err, "link rejected");
            abandon(uow, &link).await;
            return Err(err);
        }

        let link_id = LinkId::generate();
        if let Err(err) = uow.insert_link(&link, &link_id).await {
            debug!(link = %link, error = %err, "link insert failed");
            abandon(uow, &link).await;
            return Err(err.into());
        }
        uow.commit().await?;
        debug!(link = %link, link_id = %link_id, "link created");
        Ok(link_id)
    }

    async fn delete_link(&self, link: Link) -> Result<LinkId, Error> {
        let mut uow = self.units.begin().await?;
        let removed = match uow.delete_link(&link).await {
            Ok(removed) => removed,
            Err(err) => {
                abandon(uow, &link).await;
                return Err(err.into());
            }
        };
        let Some(link_id) = removed else {
            abandon(uow, &link).await;
            return Err(Error::not_found(format!("{link} does not exist")));
        };
        uow.commit().await?;
        debug!(link = %link, link_id = %link_id, "link deleted");
        Ok(link_id)
    }
}

#[cfg(test)]
#[path = "association_service_tests.rs"]
mod tests;
