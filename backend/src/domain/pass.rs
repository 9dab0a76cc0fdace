//! Purchasable passes that grant access to events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::PassId;
use super::validation::{self, FieldValidationError};

/// A pass sold to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    #[schema(value_type = String)]
    pub id: PassId,
    #[schema(example = "Gold")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price with two decimal places.
    #[schema(value_type = String, example = "499.00")]
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = String, example = "499.00")]
    pub cost: Decimal,
}

impl PassDraft {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::non_empty("name", &self.name)?;
        validation::non_negative("cost", self.cost)
    }

    pub fn into_pass(self, id: PassId) -> Pass {
        Pass {
            id,
            name: self.name,
            description: self.description,
            cost: self.cost.round_dp(2),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PassPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
}

impl PassPatch {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validation::optional(self.name.as_deref(), |v| validation::non_empty("name", v))?;
        validation::optional(self.cost.as_ref(), |v| {
            validation::non_negative("cost", *v)
        })
    }

    pub fn apply_to(&self, pass: &mut Pass) {
        if let Some(name) = &self.name {
            pass.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            pass.description = Some(description.clone());
        }
        if let Some(cost) = self.cost {
            pass.cost = cost.round_dp(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(cost: Decimal) -> PassDraft {
        PassDraft {
            name: "Gold".into(),
            description: None,
            cost,
        }
    }

    #[rstest]
    #[case(Decimal::new(49_900, 2), true)]
    #[case(Decimal::ZERO, true)]
    #[case(Decimal::new(-100, 2), false)]
    fn cost_must_not_be_negative(#[case] cost: Decimal, #[case] valid: bool) {
        assert_eq!(draft(cost).validate().is_ok(), valid);
    }

    #[rstest]
    fn cost_is_rounded_to_cents() {
        let pass = draft(Decimal::new(12_345, 3)).into_pass(PassId::new("p1").expect("id"));
        assert_eq!(pass.cost, Decimal::new(1_234, 2));
    }

    #[rstest]
    fn patch_updates_cost_only() {
        let mut pass = draft(Decimal::ONE).into_pass(PassId::new("p1").expect("id"));
        PassPatch {
            cost: Some(Decimal::TEN),
            ..PassPatch::default()
        }
        .apply_to(&mut pass);
        assert_eq!(pass.cost, Decimal::TEN);
        assert_eq!(pass.name, "Gold");
    }

    #[rstest]
    fn cost_serialises_as_string() {
        let pass = draft(Decimal::new(49_900, 2)).into_pass(PassId::new("p1").expect("id"));
        let value = serde_json::to_value(&pass).expect("serialise");
        assert_eq!(value["cost"], "499.00");
    }
}
