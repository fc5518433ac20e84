//! Configuration loading, builders and URI parsing through the public API

use crate::{assert_err, assert_ok};
use redis_kit::{
    ClientOptions, Config, ConnOpt, LogLevel, RedisKitError, ScanMode, Validate, parse_redis_uri,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_full_config_file() {
    let yaml = r#"
client:
  addr: "redis.internal:6379"
  username: "svc"
  password: "pw"
  db: 1
  prefix: "billing"
  read_timeout_ms: 1500
  tls:
    insecure: true

cluster:
  addrs: ["10.0.0.1:7000", "10.0.0.2:7000"]
  max_redirects: 3

stream:
  name: "invoices"
  buffer_size: 8
  poll_interval_ms: 50
  scan_mode: cursor

logging: warn
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = assert_ok!(Config::from_file(file.path()).await);
    assert_eq!(config.client.key_prefix(), "billing:");
    assert!(config.client.is_tls());
    assert_eq!(config.client.response_timeout(), Duration::from_millis(3000));
    assert_eq!(config.cluster.as_ref().unwrap().max_redirects, 3);
    assert_eq!(config.stream.poll_interval(), Duration::from_millis(50));
    assert_eq!(config.stream.scan_mode, ScanMode::Cursor);
    assert_eq!(config.logging, LogLevel::Warn);

    let url = assert_ok!(config.client.connection_url());
    assert_eq!(url, "rediss://svc:pw@redis.internal:6379/1#insecure");
}

#[tokio::test]
async fn test_config_file_with_bad_stream_section() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"stream:\n  name: \"\"\n").unwrap();

    let err = assert_err!(Config::from_file(file.path()).await);
    assert!(err.to_string().contains("Stream config error"));
}

#[test]
fn test_builder_matches_uri() {
    let from_builder = assert_ok!(
        ClientOptions::new()
            .with_addr("localhost:6379")
            .with_password("mypassword")
            .with_db(3, "")
            .build_client()
    );

    let from_uri = match assert_ok!(parse_redis_uri("redis://:mypassword@localhost:6379/3")) {
        ConnOpt::Client(config) => config,
        other => panic!("unexpected options: {:?}", other),
    };

    assert_eq!(from_builder, from_uri);
    assert!(from_uri.validate().is_ok());
}

#[test]
fn test_builder_collection_validation() {
    let err = assert_err!(
        ClientOptions::new()
            .with_db(0, "a")
            .with_db(0, "b")
            .build_collection()
    );
    assert!(matches!(err, RedisKitError::Validation(_)));
}
