//! Opaque identifiers for fest entities and association rows.
//!
//! Identifiers are generated by the application, never reused, and stored as
//! `VARCHAR(22)` primary keys. Most entities use a URL-safe base64 encoding of
//! a random UUIDv4 (22 characters, no padding). Users get a shorter base62
//! identifier because it is printed on passes and read out at the gate.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum length of a stored identifier.
pub const ID_MAX_LEN: usize = 22;

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Validation errors raised when parsing identifiers from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    #[error("{kind} id must not be empty")]
    Empty { kind: &'static str },
    #[error("{kind} id must not contain surrounding whitespace")]
    Whitespace { kind: &'static str },
    #[error("{kind} id must be at most {max} characters")]
    TooLong { kind: &'static str, max: usize },
}

fn validate_raw(kind: &'static str, raw: &str) -> Result<(), IdValidationError> {
    if raw.is_empty() {
        return Err(IdValidationError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdValidationError::Whitespace { kind });
    }
    if raw.chars().count() > ID_MAX_LEN {
        return Err(IdValidationError::TooLong {
            kind,
            max: ID_MAX_LEN,
        });
    }
    Ok(())
}

/// Encode a fresh UUIDv4 as unpadded URL-safe base64.
fn random_base64_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}

/// Encode the first six bytes of a fresh UUIDv4 in base62.
fn random_short_id() -> String {
    let uuid = Uuid::new_v4();
    let number = uuid
        .as_bytes()
        .iter()
        .take(6)
        .fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte));
    base62(number)
}

fn base62(mut number: u64) -> String {
    if number == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while number > 0 {
        let remainder = (number % 62) as usize;
        digits.push(char::from(BASE62_ALPHABET[remainder]));
        number /= 62;
    }
    digits.iter().rev().collect()
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $generator:path) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap an identifier received from a caller.
            pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
                let raw = id.into();
                validate_raw($kind, &raw)?;
                Ok(Self(raw))
            }

            /// Generate a fresh identifier.
            pub fn generate() -> Self {
                Self($generator())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a fest participant.
    UserId,
    "user",
    random_short_id
);
define_entity_id!(
    /// Identifier of a purchasable pass.
    PassId,
    "pass",
    random_base64_id
);
define_entity_id!(
    /// Identifier of a fest event.
    EventId,
    "event",
    random_base64_id
);
define_entity_id!(
    /// Identifier of a team.
    TeamId,
    "team",
    random_base64_id
);
define_entity_id!(
    /// Identifier of a support ticket.
    SupportTicketId,
    "support ticket",
    random_base64_id
);
define_entity_id!(
    /// Identifier of an association row. Independent of the linked endpoints.
    LinkId,
    "link",
    random_base64_id
);
