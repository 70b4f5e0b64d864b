//! The closed set of recognized Firebase config fields.

use std::fmt;

use super::name::to_env_style_name;

/// A recognized configuration field.
///
/// The declaration order of [`Field::ALL`] is the order fields are read from
/// the environment and written to the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ApiKey,
    AuthDomain,
    ProjectId,
    StorageBucket,
    MessagingSenderId,
    AppId,
    MeasurementId,
    DatabaseUrl,
}

impl Field {
    /// Fields that must be populated for the artifact to be usable.
    pub const REQUIRED: [Field; 6] = [
        Field::ApiKey,
        Field::AuthDomain,
        Field::ProjectId,
        Field::StorageBucket,
        Field::MessagingSenderId,
        Field::AppId,
    ];

    pub const OPTIONAL: [Field; 2] = [Field::MeasurementId, Field::DatabaseUrl];

    /// `REQUIRED` followed by `OPTIONAL`.
    pub const ALL: [Field; 8] = [
        Field::ApiKey,
        Field::AuthDomain,
        Field::ProjectId,
        Field::StorageBucket,
        Field::MessagingSenderId,
        Field::AppId,
        Field::MeasurementId,
        Field::DatabaseUrl,
    ];

    /// The exact, case-sensitive key used in config mappings and the artifact.
    pub const fn key(self) -> &'static str {
        match self {
            Field::ApiKey => "apiKey",
            Field::AuthDomain => "authDomain",
            Field::ProjectId => "projectId",
            Field::StorageBucket => "storageBucket",
            Field::MessagingSenderId => "messagingSenderId",
            Field::AppId => "appId",
            Field::MeasurementId => "measurementId",
            Field::DatabaseUrl => "databaseURL",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, Field::MeasurementId | Field::DatabaseUrl)
    }

    /// Fields whose values are masked in debug output.
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Field::ApiKey | Field::MeasurementId)
    }

    /// The environment variable suffix for this field, e.g. `AUTH_DOMAIN`.
    pub fn env_name(self) -> String {
        to_env_style_name(self.key())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
