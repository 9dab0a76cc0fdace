//! Shared plumbing for the link create/delete endpoints.

use actix_web::web;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Link, LinkCreated, LinkValidation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const fn enabled() -> bool {
    true
}

/// `?validate=` flag accepted by member and registration links.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateQuery {
    /// Run eligibility checks before linking. Defaults to `true`.
    #[serde(default = "enabled")]
    pub validate: bool,
}

impl From<ValidateQuery> for LinkValidation {
    fn from(query: ValidateQuery) -> Self {
        Self {
            validate: query.validate,
            host_only: false,
        }
    }
}

/// Flags accepted when registering a team for an event.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct TeamEventQuery {
    /// Run eligibility checks before linking. Defaults to `true`.
    #[serde(default = "enabled")]
    pub validate: bool,
    /// Check only the host's pass. Defaults to `false`.
    #[serde(default)]
    pub host_only: bool,
}

impl From<TeamEventQuery> for LinkValidation {
    fn from(query: TeamEventQuery) -> Self {
        Self {
            validate: query.validate,
            host_only: query.host_only,
        }
    }
}

pub(crate) async fn create(
    state: &HttpState,
    link: Link,
    validation: LinkValidation,
) -> ApiResult<web::Json<LinkCreated>> {
    let id = state.links.create_link(link, validation).await?;
    Ok(web::Json(LinkCreated { id }))
}

pub(crate) async fn delete(state: &HttpState, link: Link) -> ApiResult<web::Json<LinkCreated>> {
    let id = state.links.delete_link(link).await?;
    Ok(web::Json(LinkCreated { id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true, false)]
    #[case("validate=false", false, false)]
    #[case("hostOnly=true", true, true)]
    #[case("validate=false&hostOnly=true", false, true)]
    fn team_event_flags_default_sensibly(
        #[case] query: &str,
        #[case] validate: bool,
        #[case] host_only: bool,
    ) {
        let parsed = web::Query::<TeamEventQuery>::from_query(query).expect("query parses");
        let flags = LinkValidation::from(parsed.into_inner());
        assert_eq!(flags.validate, validate);
        assert_eq!(flags.host_only, host_only);
    }

    #[rstest]
    fn validate_defaults_to_true() {
        let parsed = web::Query::<ValidateQuery>::from_query("").expect("query parses");
        assert_eq!(LinkValidation::from(parsed.into_inner()), LinkValidation::default());
    }
}
