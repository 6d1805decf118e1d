//! Runtime environment derived from configuration.
//!
//! Responsibilities:
//! - Own the closed set of recognized environment names.
//! - Convert a raw name into a validated [`Environment`].
//!
//! Does NOT handle:
//! - Reading the name from a schema (see `loader`).
//!
//! Invariants:
//! - Matching is exact and case-sensitive; no trimming or normalization.
//! - An `Environment` value can only be obtained through `from_name`/`FromStr`
//!   or the listed constants, so every value names a recognized environment.
//! - Unrecognized names are always an error, never mapped to a fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::loader::ConfigError;

/// Deployment stage a service is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Developer machine.
    Local,
    /// Shared development cluster.
    Dev,
    /// Pre-production.
    Staging,
    /// Production.
    Prod,
}

impl Environment {
    /// Every recognized environment, in promotion order.
    pub const ALL: [Environment; 4] = [
        Environment::Local,
        Environment::Dev,
        Environment::Staging,
        Environment::Prod,
    ];

    /// Validate a raw environment name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnrecognizedEnvironment`] when `name` is not one
    /// of `local`, `dev`, `staging`, `prod` (compared case-sensitively).
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == name)
            .ok_or_else(|| ConfigError::UnrecognizedEnvironment(name.to_string()))
    }

    /// Canonical name of this environment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, Environment::Prod)
    }

    pub const fn is_local(self) -> bool {
        matches!(self, Environment::Local)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Serialize for Environment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
