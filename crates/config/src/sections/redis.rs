//! Redis connection settings.

use serde::Serialize;

use crate::schema::{FieldSpec, Section};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Redis {
    pub host: String,
    pub port: u16,
    /// Logical database index; 0 when unset.
    pub db: u32,
}

impl Section for Redis {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Redis>;
        vec![
            F::string("host", |c, v| c.host = v).required(),
            F::integer("port", |c, v: u16| c.port = v).required(),
            F::integer("db", |c, v: u32| c.db = v).describe("Logical database index"),
        ]
    }
}
