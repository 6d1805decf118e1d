//! Relational database connection settings.

use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;

use super::serde_helpers;
use crate::schema::{FieldSpec, Section};

/// Database connection and migration settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// Driver name, e.g. `postgres`.
    #[serde(rename = "type")]
    pub db_type: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    #[serde(serialize_with = "serde_helpers::redacted")]
    pub password: SecretString,
    pub schema: String,
    pub migration_path: String,
    pub max_attempts: u32,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub attempt_delay: Duration,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            db_type: String::new(),
            host: String::new(),
            port: 0,
            name: String::new(),
            user: String::new(),
            password: SecretString::new(String::new().into()),
            schema: String::new(),
            migration_path: String::new(),
            max_attempts: 0,
            attempt_delay: Duration::ZERO,
        }
    }
}

impl Section for Database {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Database>;
        vec![
            F::string("type", |c, v| c.db_type = v)
                .required()
                .describe("Database driver"),
            F::string("host", |c, v| c.host = v).required(),
            F::integer("port", |c, v: u16| c.port = v).required(),
            F::string("name", |c, v| c.name = v)
                .required()
                .describe("Database name"),
            F::string("user", |c, v| c.user = v).required(),
            F::secret("password", |c, v| c.password = v).required(),
            F::string("schema", |c, v| c.schema = v).default_value("public"),
            F::string("migrationPath", |c, v| c.migration_path = v)
                .required()
                .describe("Directory holding migration files"),
            F::integer("maxAttempts", |c, v: u32| c.max_attempts = v)
                .required()
                .describe("Connection attempts before giving up"),
            F::duration("attemptDelay", |c, v| c.attempt_delay = v)
                .required()
                .describe("Pause between connection attempts"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{SourceFormat, decode_str};
    use crate::loader::ConfigError;
    use secrecy::ExposeSecret;

    const FULL: &str = "\
type: postgres
host: db.local
port: 5432
name: orders
user: svc
password: hunter2
migrationPath: ./migrations
maxAttempts: 5
attemptDelay: 2s
";

    #[test]
    fn test_full_document_decodes() {
        let mut db = Database::default();
        decode_str(FULL, SourceFormat::Yaml, &mut db).unwrap();
        assert_eq!(db.db_type, "postgres");
        assert_eq!(db.port, 5432);
        assert_eq!(db.password.expose_secret(), "hunter2");
        assert_eq!(db.schema, "public");
        assert_eq!(db.max_attempts, 5);
        assert_eq!(db.attempt_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_port_is_reported() {
        let mut db = Database::default();
        let err = decode_str("type: postgres\nhost: db.local\n", SourceFormat::Yaml, &mut db)
            .unwrap_err();
        assert!(matches!(err, ConfigError::RequiredFieldMissing(ref f) if f == "port"));
    }

    #[test]
    fn test_serialization_redacts_password() {
        let mut db = Database::default();
        decode_str(FULL, SourceFormat::Yaml, &mut db).unwrap();
        let json = serde_json::to_value(&db).unwrap();
        assert_eq!(json["password"], "[REDACTED]");
        assert_eq!(json["type"], "postgres");
        assert_eq!(json["attemptDelay"], "2s");
        assert!(!json.to_string().contains("hunter2"));
    }
}
