//! Fest participant model.
//!
//! A user may hold at most one pass. Email addresses and registration numbers
//! are unique across users; the persistence layer enforces uniqueness.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{PassId, UserId};
use super::validation::{self, FieldValidationError};

/// A registered fest participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fKx9aZ")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email_address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub pass_id: Option<PassId>,
}

/// Fields accepted when registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub pass_id: Option<PassId>,
}

impl UserDraft {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::non_empty("firstName", &self.first_name)?;
        validation::non_empty("lastName", &self.last_name)?;
        validation::email("emailAddress", &self.email_address)
    }

    /// Assign `id` and produce the stored user.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            phone_number: self.phone_number,
            registration_number: self.registration_number,
            pass_id: self.pass_id,
        }
    }
}

/// Partial update of a user. Absent fields are left untouched.
///
/// Assigning a pass through a patch bypasses eligibility checks; pass
/// assignment has no effect on existing event or team links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub registration_number: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub pass_id: Option<PassId>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::optional(self.first_name.as_deref(), |v| {
            validation::non_empty("firstName", v)
        })?;
        validation::optional(self.last_name.as_deref(), |v| {
            validation::non_empty("lastName", v)
        })?;
        validation::optional(self.email_address.as_deref(), |v| {
            validation::email("emailAddress", v)
        })
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            user.last_name.clone_from(last_name);
        }
        if let Some(email_address) = &self.email_address {
            user.email_address.clone_from(email_address);
        }
        if let Some(phone_number) = &self.phone_number {
            user.phone_number = Some(phone_number.clone());
        }
        if let Some(registration_number) = self.registration_number {
            user.registration_number = Some(registration_number);
        }
        if let Some(pass_id) = &self.pass_id {
            user.pass_id = Some(pass_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
            phone_number: None,
            registration_number: Some(21_001),
            pass_id: None,
        }
    }

    #[rstest]
    fn valid_draft_becomes_user(draft: UserDraft) {
        assert!(draft.validate().is_ok());
        let id = UserId::new("u1").expect("id");
        let user = draft.into_user(id.clone());
        assert_eq!(user.id, id);
        assert_eq!(user.registration_number, Some(21_001));
    }

    #[rstest]
    fn rejects_blank_first_name(mut draft: UserDraft) {
        draft.first_name = "  ".into();
        assert_eq!(
            draft.validate(),
            Err(FieldValidationError::Empty { field: "firstName" })
        );
    }

    #[rstest]
    fn patch_only_touches_present_fields(draft: UserDraft) {
        let mut user = draft.into_user(UserId::new("u1").expect("id"));
        let patch = UserPatch {
            last_name: Some("Byron".into()),
            pass_id: Some(PassId::new("p1").expect("id")),
            ..UserPatch::default()
        };
        assert!(patch.validate().is_ok());
        patch.apply_to(&mut user);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Byron");
        assert_eq!(user.pass_id.as_ref().map(PassId::as_str), Some("p1"));
    }

    #[rstest]
    fn patch_rejects_malformed_email() {
        let patch = UserPatch {
            email_address: Some("nobody".into()),
            ..UserPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[rstest]
    fn deserialises_camel_case_payloads() {
        let draft: UserDraft = serde_json::from_str(
            r#"{"firstName":"A","lastName":"B","emailAddress":"a@b.c","passId":"p1"}"#,
        )
        .expect("parse");
        assert_eq!(draft.pass_id.as_ref().map(PassId::as_str), Some("p1"));
        assert!(draft.phone_number.is_none());
    }
}
