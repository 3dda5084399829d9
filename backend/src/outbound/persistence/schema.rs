//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// User accounts table.
    ///
    /// One row per registered user, keyed by the unique username. Profile
    /// and upload columns stay NULL until the matching operation has run.
    users (id) {
        /// Surrogate primary key.
        id -> Integer,
        /// Unique account name (`UNIQUE NOT NULL`).
        username -> Text,
        /// Plain-text credential compared verbatim at login.
        password -> Text,
        /// Optional profile field.
        firstname -> Nullable<Text>,
        /// Optional profile field.
        lastname -> Nullable<Text>,
        /// Optional profile field.
        email -> Nullable<Text>,
        /// Optional profile field.
        address -> Nullable<Text>,
        /// Storage key of the uploaded limerick, when present.
        limerick_filename -> Nullable<Text>,
        /// Word count recomputed at upload time, present iff the filename is.
        limerick_wordcount -> Nullable<BigInt>,
    }
}
