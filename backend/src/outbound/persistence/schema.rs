//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Uuid,
        username -> Text,
        email -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    tasks (id) {
        id -> Uuid,
        owner_id -> Uuid,
        /// Optional project reference. Not cascaded on project deletion.
        project_id -> Nullable<Uuid>,
        title -> Text,
        description -> Nullable<Text>,
        /// One of `To Do`, `In Progress`, `Done`.
        status -> Varchar,
        due_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    payment_appointments (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Text,
        amount -> Float8,
        date -> Timestamptz,
        /// One of `Pending`, `Paid`.
        status -> Varchar,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (owner_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(payment_appointments -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, tasks, payment_appointments);
