//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` after changing them.

diesel::table! {
    /// Student enrollment records.
    ///
    /// Profile scalars are plain text columns; each nested value object is a
    /// `jsonb` document owned by its row.
    students (id) {
        /// Primary key drawn from a monotonic sequence; never reused.
        id -> Int8,
        name -> Text,
        address -> Text,
        national_id -> Text,
        email -> Text,
        birth_date -> Text,
        phone -> Text,
        govern -> Text,
        religion -> Text,
        gender -> Text,
        parent -> Jsonb,
        military -> Jsonb,
        previous_education -> Jsonb,
        recent_education -> Jsonb,
    }
}
