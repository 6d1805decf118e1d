//! gRPC server and client settings.
//!
//! Server fields are overridable through `GRPC_*` variables. Client fields
//! declare unprefixed variables (`HOST`, `PORT`, ...), which only apply when a
//! `GrpcClient` is the decoded schema itself; clients listed under
//! `grpc.clients` are taken from the file alone.

use std::time::Duration;

use serde::Serialize;

use super::serde_helpers;
use crate::schema::{FieldSpec, Section};

/// gRPC server settings. Zero sizes and windows mean "use the gRPC default".
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcServer {
    pub host: String,
    pub port: u16,

    #[serde(rename = "enableTLS")]
    pub enable_tls: bool,
    pub cert_file: String,
    pub key_file: String,
    #[serde(rename = "clientCAFile")]
    pub client_ca_file: String,

    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_max_connection_idle: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_max_connection_age: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_max_connection_age_grace: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_server_time: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_server_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_enforcement_policy_min_time: Duration,
    pub keep_alive_enforcement_policy_permit_without_stream: bool,

    pub max_receive_message_size: usize,
    pub max_send_message_size: usize,
    pub max_concurrent_streams: u32,
    pub initial_window_size: i32,
    pub initial_conn_window_size: i32,
    pub read_buffer_size: usize,
    pub write_buffer_size: usize,

    pub enable_health_check_service: bool,
    pub enable_reflection_service: bool,

    #[serde(serialize_with = "serde_helpers::duration")]
    pub graceful_shutdown_timeout: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub connection_timeout: Duration,
}

impl Section for GrpcServer {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<GrpcServer>;
        vec![
            F::string("host", |c, v| c.host = v)
                .env("GRPC_HOST")
                .default_value("0.0.0.0")
                .describe("Listen address"),
            F::integer("port", |c, v: u16| c.port = v)
                .env("GRPC_PORT")
                .required()
                .describe("Listen port"),
            F::boolean("enableTLS", |c, v| c.enable_tls = v)
                .env("GRPC_ENABLE_TLS")
                .default_value("false"),
            F::string("certFile", |c, v| c.cert_file = v)
                .env("GRPC_CERT_FILE")
                .describe("Server certificate"),
            F::string("keyFile", |c, v| c.key_file = v)
                .env("GRPC_KEY_FILE")
                .describe("Server private key"),
            F::string("clientCAFile", |c, v| c.client_ca_file = v)
                .env("GRPC_CLIENT_CA_FILE")
                .describe("Client CA for mTLS"),
            F::duration("keepAliveMaxConnectionIdle", |c, v| c.keep_alive_max_connection_idle = v)
                .env("GRPC_KEEP_ALIVE_MAX_CONNECTION_IDLE")
                .default_value("0s")
                .describe("Idle time before GOAWAY; 0s = infinite"),
            F::duration("keepAliveMaxConnectionAge", |c, v| c.keep_alive_max_connection_age = v)
                .env("GRPC_KEEP_ALIVE_MAX_CONNECTION_AGE")
                .default_value("0s")
                .describe("Maximum connection lifetime; 0s = infinite"),
            F::duration("keepAliveMaxConnectionAgeGrace", |c, v| {
                c.keep_alive_max_connection_age_grace = v
            })
            .env("GRPC_KEEP_ALIVE_MAX_CONNECTION_AGE_GRACE")
            .default_value("0s"),
            F::duration("keepAliveServerTime", |c, v| c.keep_alive_server_time = v)
                .env("GRPC_KEEP_ALIVE_SERVER_TIME")
                .default_value("2h")
                .describe("Idle time before the server pings"),
            F::duration("keepAliveServerTimeout", |c, v| c.keep_alive_server_timeout = v)
                .env("GRPC_KEEP_ALIVE_SERVER_TIMEOUT")
                .default_value("20s"),
            F::duration("keepAliveEnforcementPolicyMinTime", |c, v| {
                c.keep_alive_enforcement_policy_min_time = v
            })
            .env("GRPC_KEEP_ALIVE_ENFORCEMENT_MIN_TIME")
            .default_value("5m")
            .describe("Minimum interval between client pings"),
            F::boolean("keepAliveEnforcementPolicyPermitWithoutStream", |c, v| {
                c.keep_alive_enforcement_policy_permit_without_stream = v
            })
            .env("GRPC_KEEP_ALIVE_ENFORCEMENT_PERMIT_WITHOUT_STREAM")
            .default_value("false"),
            F::integer("maxReceiveMessageSize", |c, v: usize| c.max_receive_message_size = v)
                .env("GRPC_MAX_RECEIVE_MESSAGE_SIZE")
                .default_value("4194304"),
            F::integer("maxSendMessageSize", |c, v: usize| c.max_send_message_size = v)
                .env("GRPC_MAX_SEND_MESSAGE_SIZE")
                .default_value("0"),
            F::integer("maxConcurrentStreams", |c, v: u32| c.max_concurrent_streams = v)
                .env("GRPC_MAX_CONCURRENT_STREAMS")
                .default_value("0"),
            F::integer("initialWindowSize", |c, v: i32| c.initial_window_size = v)
                .env("GRPC_INITIAL_WINDOW_SIZE")
                .default_value("0"),
            F::integer("initialConnWindowSize", |c, v: i32| c.initial_conn_window_size = v)
                .env("GRPC_INITIAL_CONN_WINDOW_SIZE")
                .default_value("0"),
            F::integer("readBufferSize", |c, v: usize| c.read_buffer_size = v)
                .env("GRPC_READ_BUFFER_SIZE")
                .default_value("32768"),
            F::integer("writeBufferSize", |c, v: usize| c.write_buffer_size = v)
                .env("GRPC_WRITE_BUFFER_SIZE")
                .default_value("32768"),
            F::boolean("enableHealthCheckService", |c, v| c.enable_health_check_service = v)
                .env("GRPC_ENABLE_HEALTH_CHECK_SERVICE")
                .default_value("true"),
            F::boolean("enableReflectionService", |c, v| c.enable_reflection_service = v)
                .env("GRPC_ENABLE_REFLECTION_SERVICE")
                .default_value("true"),
            F::duration("gracefulShutdownTimeout", |c, v| c.graceful_shutdown_timeout = v)
                .env("GRPC_GRACEFUL_SHUTDOWN_TIMEOUT")
                .default_value("30s")
                .describe("Wait for in-flight RPCs before forcing shutdown"),
            F::duration("connectionTimeout", |c, v| c.connection_timeout = v)
                .env("GRPC_CONNECTION_TIMEOUT")
                .default_value("120s"),
        ]
    }
}

/// Settings for one outbound gRPC connection.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcClient {
    pub host: String,
    pub port: u16,
    pub user_agent: String,

    #[serde(rename = "enableTLS")]
    pub enable_tls: bool,
    pub ca_cert_file: String,
    pub client_cert_file: String,
    pub client_key_file: String,
    pub server_name_override: String,

    pub connect_max_attempts: u32,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub connect_initial_backoff: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub connect_max_backoff: Duration,
    pub connect_backoff_multiplier: f64,

    #[serde(serialize_with = "serde_helpers::duration")]
    pub dial_timeout: Duration,

    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_time: Duration,
    #[serde(serialize_with = "serde_helpers::duration")]
    pub keep_alive_timeout: Duration,
    pub permit_without_stream: bool,

    pub max_recv_msg_size: usize,
    pub max_send_msg_size: usize,
}

impl Section for GrpcClient {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<GrpcClient>;
        vec![
            F::string("host", |c, v| c.host = v).env("HOST"),
            F::integer("port", |c, v: u16| c.port = v).env("PORT"),
            F::string("userAgent", |c, v| c.user_agent = v).env("USER_AGENT"),
            F::boolean("enableTLS", |c, v| c.enable_tls = v)
                .env("ENABLE_TLS")
                .default_value("false"),
            F::string("caCertFile", |c, v| c.ca_cert_file = v)
                .env("CA_CERT_FILE")
                .describe("CA that signed the server certificate"),
            F::string("clientCertFile", |c, v| c.client_cert_file = v)
                .env("CLIENT_CERT_FILE")
                .describe("Client certificate for mTLS"),
            F::string("clientKeyFile", |c, v| c.client_key_file = v)
                .env("CLIENT_KEY_FILE")
                .describe("Client private key for mTLS"),
            F::string("serverNameOverride", |c, v| c.server_name_override = v)
                .env("SERVER_NAME_OVERRIDE")
                .describe("Expected server name in the TLS certificate"),
            F::integer("connectMaxAttempts", |c, v: u32| c.connect_max_attempts = v)
                .env("CONNECT_MAX_ATTEMPTS")
                .default_value("5"),
            F::duration("connectInitialBackoff", |c, v| c.connect_initial_backoff = v)
                .env("CONNECT_INITIAL_BACKOFF")
                .default_value("250ms"),
            F::duration("connectMaxBackoff", |c, v| c.connect_max_backoff = v)
                .env("CONNECT_MAX_BACKOFF")
                .default_value("5s"),
            F::float("connectBackoffMultiplier", |c, v| c.connect_backoff_multiplier = v)
                .env("CONNECT_BACKOFF_MULTIPLIER")
                .default_value("2.0"),
            F::duration("dialTimeout", |c, v| c.dial_timeout = v)
                .env("DIAL_TIMEOUT")
                .default_value("5s"),
            F::duration("keepAliveTime", |c, v| c.keep_alive_time = v)
                .env("KEEP_ALIVE_TIME")
                .default_value("30s"),
            F::duration("keepAliveTimeout", |c, v| c.keep_alive_timeout = v)
                .env("KEEP_ALIVE_TIMEOUT")
                .default_value("20s"),
            F::boolean("permitWithoutStream", |c, v| c.permit_without_stream = v)
                .env("PERMIT_WITHOUT_STREAM")
                .default_value("true"),
            F::integer("maxRecvMsgSize", |c, v: usize| c.max_recv_msg_size = v)
                .env("MAX_RECV_MSG_SIZE")
                .default_value("4194304"),
            F::integer("maxSendMsgSize", |c, v: usize| c.max_send_msg_size = v)
                .env("MAX_SEND_MSG_SIZE")
                .default_value("4194304"),
        ]
    }
}

/// A gRPC server plus the clients it dials.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Grpc {
    pub server: GrpcServer,
    pub clients: Vec<GrpcClient>,
}

impl Section for Grpc {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Grpc>;
        let mut fields = F::nested::<GrpcServer>("server", |c| &mut c.server);
        fields.push(
            F::section_list::<GrpcClient>("clients", |c| &mut c.clients)
                .describe("Outbound connections"),
        );
        fields
    }
}
