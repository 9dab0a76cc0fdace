//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the fest entities (users, passes, events, teams, support
//! tickets), the association links between them, and the eligibility rules
//! that govern who may join which event. Types here are transport agnostic;
//! adapters live in `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Entity ids: opaque, application-generated identifiers.
//! - Entities with their `*Draft` (create) and `*Patch` (update) shapes.
//! - Link / LinkValidation: association rows and creation flags.
//! - AssociationService: transactional link creation and removal.

pub mod association_service;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod ids;
pub mod links;
pub mod pass;
pub mod ports;
pub mod support_ticket;
pub mod team;
mod trace_id;
pub mod user;
pub mod validation;

pub use self::association_service::AssociationService;
pub use self::eligibility::{EligibilityError, validate_team_for_event, validate_user_for_event};
pub use self::error::{Error, ErrorCode};
pub use self::event::{Event, EventCategory, EventDraft, EventPatch, UnknownEventCategory};
pub use self::ids::{
    EventId, IdValidationError, LinkId, PassId, SupportTicketId, TeamId, UserId,
};
pub use self::links::{Link, LinkCreated, LinkValidation};
pub use self::pass::{Pass, PassDraft, PassPatch};
pub use self::support_ticket::{
    ResolutionError, SupportTicket, SupportTicketCategory, SupportTicketDraft,
    SupportTicketPatch, SupportTicketResolution, UnknownSupportTicketCategory,
};
pub use self::team::{Team, TeamDraft, TeamPatch};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserPatch};
pub use self::validation::FieldValidationError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use fest_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
