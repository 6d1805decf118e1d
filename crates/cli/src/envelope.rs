//! Service document wrapper used by `check` and `env`.
//!
//! A checked file has the shape `{ env, <key>: <section> }`, which is how a
//! service built on a single shipped section lays out its configuration.

use serde::Serialize;
use svc_config::sections::{
    Database, Grpc, GrpcClient, GrpcServer, KafkaConsumer, KafkaProducer, KafkaTopics, Redis,
};
use svc_config::{ConfigSchema, FieldSpec, Section};

/// Environment variable that overrides the document's `env` key.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// A section that lives under a fixed key in a service document.
pub trait Keyed: Section + Serialize {
    const KEY: &'static str;
}

impl Keyed for Database {
    const KEY: &'static str = "database";
}

impl Keyed for Redis {
    const KEY: &'static str = "redis";
}

impl Keyed for KafkaProducer {
    const KEY: &'static str = "producer";
}

impl Keyed for KafkaConsumer {
    const KEY: &'static str = "consumer";
}

impl Keyed for KafkaTopics {
    const KEY: &'static str = "topics";
}

impl Keyed for GrpcServer {
    const KEY: &'static str = "server";
}

impl Keyed for GrpcClient {
    const KEY: &'static str = "client";
}

impl Keyed for Grpc {
    const KEY: &'static str = "grpc";
}

#[derive(Debug, Default)]
pub struct Envelope<T> {
    pub env: String,
    pub section: T,
}

impl<T: Keyed> Section for Envelope<T> {
    fn fields() -> Vec<FieldSpec<Self>> {
        let mut fields = vec![
            FieldSpec::string("env", |c: &mut Envelope<T>, v| c.env = v)
                .env(APP_ENV_VAR)
                .required()
                .describe("Runtime environment: local, dev, staging or prod"),
        ];
        fields.extend(FieldSpec::nested::<T>(T::KEY, |c: &mut Envelope<T>| {
            &mut c.section
        }));
        fields
    }
}

impl<T: Keyed> ConfigSchema for Envelope<T> {
    fn environment_name(&self) -> &str {
        &self.env
    }
}
