//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Employee records keyed by their externally supplied identifier.
    employees (employee_id) {
        /// Business key, 1-50 characters of `[A-Za-z0-9_-]`.
        employee_id -> Varchar,
        /// Trimmed full name.
        name -> Varchar,
        /// Age in years, 18-100.
        age -> Int4,
        /// Department display name.
        department -> Varchar,
        /// Insertion sequence; defines listing order.
        created_seq -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
