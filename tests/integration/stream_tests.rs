//! Stream publisher and consumer over the in-memory backend

use crate::assert_ok;
use crate::common::Order;
use redis_kit::{MemoryStreamBackend, RedisStream, StreamConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

fn config(name: &str) -> StreamConfig {
    StreamConfig::new(name).with_poll_interval(Duration::from_millis(5))
}

#[tokio::test]
async fn test_streams_sharing_a_backend_stay_separate() {
    let backend = Arc::new(MemoryStreamBackend::new());
    let orders = RedisStream::with_backend(Arc::clone(&backend), config("orders"));
    let refunds = RedisStream::with_backend(Arc::clone(&backend), config("refunds"));

    assert_ok!(orders.publish(&Order::new(1)).await);
    assert_ok!(refunds.publish(&Order::new(2)).await);

    let mut consumer = refunds.consume::<Order>(0);
    let order = timeout(Duration::from_secs(2), consumer.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order, Order::new(2));
    assert_ok!(consumer.stop().await);

    assert_eq!(backend.len("orders"), 1);
    assert!(backend.is_empty("refunds"));
}

#[tokio::test]
async fn test_publish_while_consuming() {
    let stream = RedisStream::new(MemoryStreamBackend::new(), config("live"));
    let mut consumer = stream.consume::<Order>(2);

    for order_id in 1..=6 {
        assert_ok!(stream.publish(&Order::new(order_id)).await);
    }

    let mut received = Vec::new();
    while received.len() < 6 {
        let order = timeout(Duration::from_secs(2), consumer.recv())
            .await
            .unwrap()
            .unwrap();
        received.push(order.order_id);
    }
    assert_eq!(received, vec![1, 2, 3, 4, 5, 6]);

    let stats = assert_ok!(consumer.stop().await);
    assert_eq!(stats.delivered, 6);
    assert_eq!(stats.decode_failures, 0);
}

#[tokio::test]
async fn test_consumer_reports_foreign_payloads() {
    let stream = RedisStream::new(MemoryStreamBackend::new(), config("mixed"));
    assert_ok!(stream.publish_raw(b"{\"order_id\":1}".to_vec()).await);
    assert_ok!(stream.publish(&Order::new(2)).await);

    let mut consumer = stream.consume::<Order>(0);
    let order = timeout(Duration::from_secs(2), consumer.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.order_id, 2);

    let err = timeout(Duration::from_secs(2), consumer.recv_error())
        .await
        .unwrap()
        .unwrap();
    assert!(err.is_codec_error());

    assert_ok!(consumer.stop().await);
    assert_eq!(stream.backend().len("mixed"), 1);
}
