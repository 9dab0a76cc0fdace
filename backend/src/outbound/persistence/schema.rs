//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered participants.
    users (id) {
        /// Short base62 identifier.
        id -> Varchar,
        first_name -> Text,
        last_name -> Text,
        /// Unique.
        email_address -> Text,
        phone_number -> Nullable<Text>,
        /// Unique when present.
        registration_number -> Nullable<Int8>,
        /// Held pass; cleared when the pass is deleted.
        pass_id -> Nullable<Varchar>,
    }
}

diesel::table! {
    passes (id) {
        id -> Varchar,
        name -> Text,
        description -> Nullable<Text>,
        cost -> Numeric,
    }
}

diesel::table! {
    events (id) {
        id -> Varchar,
        name -> Text,
        description -> Nullable<Text>,
        /// One of the `EventCategory` spellings, enforced by a check constraint.
        category -> Varchar,
        team_members -> Nullable<Int4>,
        starts_at -> Nullable<Timestamptz>,
        venue -> Nullable<Text>,
        /// Cleared when the organiser is deleted.
        organizer_id -> Nullable<Varchar>,
    }
}

diesel::table! {
    teams (id) {
        id -> Varchar,
        /// Unique.
        name -> Text,
        /// Deleting the host deletes the team.
        host_id -> Varchar,
    }
}

diesel::table! {
    support_tickets (id) {
        id -> Varchar,
        name -> Text,
        description -> Text,
        category -> Varchar,
        raised_at -> Timestamptz,
        solved -> Bool,
        college_name -> Nullable<Text>,
        email_address -> Nullable<Text>,
        phone_number -> Nullable<Text>,
        solved_email_address -> Nullable<Text>,
        comment -> Nullable<Text>,
    }
}

diesel::table! {
    /// Passes granting entry to events. Unique on `(pass_id, event_id)`.
    pass_events (id) {
        id -> Varchar,
        pass_id -> Varchar,
        event_id -> Varchar,
    }
}

diesel::table! {
    /// Team membership. Unique on `(team_id, user_id)`.
    team_users (id) {
        id -> Varchar,
        team_id -> Varchar,
        user_id -> Varchar,
    }
}

diesel::table! {
    /// Team registrations. Unique on `(team_id, event_id)`.
    team_events (id) {
        id -> Varchar,
        team_id -> Varchar,
        event_id -> Varchar,
    }
}

diesel::table! {
    /// Direct user registrations. Unique on `(user_id, event_id)`.
    user_events (id) {
        id -> Varchar,
        user_id -> Varchar,
        event_id -> Varchar,
    }
}

diesel::joinable!(users -> passes (pass_id));
diesel::joinable!(events -> users (organizer_id));
diesel::joinable!(teams -> users (host_id));
diesel::joinable!(pass_events -> passes (pass_id));
diesel::joinable!(pass_events -> events (event_id));
diesel::joinable!(team_users -> teams (team_id));
diesel::joinable!(team_users -> users (user_id));
diesel::joinable!(team_events -> teams (team_id));
diesel::joinable!(team_events -> events (event_id));
diesel::joinable!(user_events -> users (user_id));
diesel::joinable!(user_events -> events (event_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    passes,
    events,
    teams,
    support_tickets,
    pass_events,
    team_users,
    team_events,
    user_events,
);
