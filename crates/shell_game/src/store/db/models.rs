//! Database models for stored preferences.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// A namespaced integer preference row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::preferences)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Preference {
    namespace: String,
    name: String,
    value: i32,
    updated_at: NaiveDateTime,
}

/// Insertable preference row; replaces any row with the same key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::preferences)]
pub struct NewPreference {
    namespace: String,
    name: String,
    value: i32,
    updated_at: NaiveDateTime,
}
