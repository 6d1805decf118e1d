//! Kafka producer, consumer and topic settings.

use std::time::Duration;

use serde::Serialize;

use super::serde_helpers;
use crate::schema::{FieldSpec, Section};

/// Producer settings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaProducer {
    pub brokers: Vec<String>,
    /// Acknowledgement level: 0 none, 1 leader, -1 all replicas.
    pub required_acks: i16,
    #[serde(rename = "async")]
    pub async_writes: bool,
    pub batch_size: usize,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub batch_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub write_timeout: Duration,
    pub max_attempts: u32,
}

impl Section for KafkaProducer {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<KafkaProducer>;
        vec![
            F::list("brokers", |c, v| c.brokers = v)
                .required()
                .describe("Bootstrap brokers, host:port"),
            F::integer("requiredAcks", |c, v: i16| c.required_acks = v)
                .default_value("1")
                .describe("0 = none, 1 = leader, -1 = all"),
            F::boolean("async", |c, v| c.async_writes = v).default_value("false"),
            F::integer("batchSize", |c, v: usize| c.batch_size = v).default_value("100"),
            F::duration("batchTimeout", |c, v| c.batch_timeout = v).default_value("1s"),
            F::duration("writeTimeout", |c, v| c.write_timeout = v).default_value("10s"),
            F::integer("maxAttempts", |c, v: u32| c.max_attempts = v).default_value("3"),
        ]
    }
}

/// Consumer group settings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaConsumer {
    pub brokers: Vec<String>,
    pub group_id: String,
    pub topics: Vec<String>,
    /// `latest` or `earliest`.
    pub start_offset: String,
    pub min_bytes: usize,
    pub max_bytes: usize,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub max_wait: Duration,
    /// Zero disables auto-commit.
    #[serde(serialize_with = "serde_helpers::duration")]
    pub commit_interval: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub heartbeat_interval: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub session_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub rebalance_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub dial_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub read_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub write_timeout: Duration,
    pub max_attempts: u32,
}

impl Section for KafkaConsumer {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<KafkaConsumer>;
        vec![
            F::list("brokers", |c, v| c.brokers = v).required(),
            F::string("groupId", |c, v| c.group_id = v).required(),
            F::list("topics", |c, v| c.topics = v).required(),
            F::string("startOffset", |c, v| c.start_offset = v)
                .default_value("latest")
                .describe("latest or earliest"),
            F::integer("minBytes", |c, v: usize| c.min_bytes = v)
                .default_value("10000")
                .describe("Minimum fetch batch size"),
            F::integer("maxBytes", |c, v: usize| c.max_bytes = v)
                .default_value("10000000")
                .describe("Maximum fetch batch size"),
            F::duration("maxWait", |c, v| c.max_wait = v)
                .default_value("1s")
                .describe("Longest wait for minBytes"),
            F::duration("commitInterval", |c, v| c.commit_interval = v)
                .default_value("1s")
                .describe("Auto-commit interval; 0 disables"),
            F::duration("heartbeatInterval", |c, v| c.heartbeat_interval = v).default_value("3s"),
            F::duration("sessionTimeout", |c, v| c.session_timeout = v).default_value("30s"),
            F::duration("rebalanceTimeout", |c, v| c.rebalance_timeout = v).default_value("60s"),
            F::duration("dialTimeout", |c, v| c.dial_timeout = v).default_value("3s"),
            F::duration("readTimeout", |c, v| c.read_timeout = v).default_value("30s"),
            F::duration("writeTimeout", |c, v| c.write_timeout = v).default_value("10s"),
            F::integer("maxAttempts", |c, v: u32| c.max_attempts = v).default_value("3"),
        ]
    }
}

/// Topics to provision.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTopics {
    pub list: Vec<String>,
    pub num_partitions: i32,
    pub replication_factor: i16,
}

impl Section for KafkaTopics {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<KafkaTopics>;
        vec![
            F::list("list", |c, v| c.list = v).required(),
            F::integer("numPartitions", |c, v: i32| c.num_partitions = v).required(),
            F::integer("replicationFactor", |c, v: i16| c.replication_factor = v).required(),
        ]
    }
}
