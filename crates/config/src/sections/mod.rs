//! Ready-made section schemas for common service dependencies.
//!
//! Responsibilities:
//! - Declare the field tables for database, Redis, Kafka and gRPC settings.
//! - Serialize decoded sections for display with secrets redacted.
//!
//! Does NOT handle:
//! - Connecting to anything; these are plain data.
//!
//! Invariants:
//! - Keys are camelCase and match the on-disk documents.
//! - Serialized durations use the same compact literal syntax the decoder accepts.

mod database;
mod grpc;
mod kafka;
mod redis;

pub use database::Database;
pub use grpc::{Grpc, GrpcClient, GrpcServer};
pub use kafka::{KafkaConsumer, KafkaProducer, KafkaTopics};
pub use redis::Redis;

/// Serde helpers for section fields that have no natural string form.
pub(crate) mod serde_helpers {
    use std::time::Duration;

    use secrecy::SecretString;
    use serde::Serializer;

    use crate::constants::REDACTED;
    use crate::decoder::format_duration;

    pub fn duration<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(*value))
    }

    /// Never exposes the secret.
    pub fn redacted<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}
