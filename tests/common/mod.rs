//! Common test utilities for redis-kit

use redis_kit::{RedisClient, parse_redis_uri};
use serde::{Deserialize, Serialize};

/// Environment variable holding the live server URI for e2e tests
pub const REDIS_URL_VAR: &str = "REDIS_URL";

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

/// Message type published in stream tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub sku: String,
}

impl Order {
    pub fn new(order_id: u64) -> Self {
        Self {
            order_id,
            sku: format!("SKU-{}", order_id),
        }
    }
}

/// Random prefix so concurrent test runs do not share keys
pub fn unique_prefix(name: &str) -> String {
    format!("redis-kit-test:{}:{:08x}", name, rand::random::<u32>())
}

/// Connect to the server named by `REDIS_URL` under a fresh prefix
pub async fn live_client(name: &str) -> RedisClient {
    let uri = std::env::var(REDIS_URL_VAR).expect("REDIS_URL must be set");
    let mut config = parse_redis_uri(&uri)
        .and_then(|opt| opt.into_client_config())
        .expect("REDIS_URL must be a direct connection URI");
    config.prefix = unique_prefix(name);
    config.pool_size = 2;
    RedisClient::connect(&config)
        .await
        .expect("failed to connect to REDIS_URL")
}

/// Remove every key written under the client's prefix
pub async fn cleanup(client: &RedisClient) {
    let _ = client.batch_delete("*", None).await;
}
