//! Stream publisher and consumer against a live server

use crate::common::{Order, REDIS_URL_VAR, cleanup, live_client};
use crate::{assert_ok, skip_without_env};
use redis_kit::{RedisStream, StreamBackend, StreamConfig};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::timeout;

fn config() -> StreamConfig {
    StreamConfig::new("orders").with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
#[ignore]
async fn test_order_is_consumed_and_removed() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("stream").await;
    let stream = client.stream(config());

    let id = assert_ok!(stream.publish(&Order::new(42)).await);
    assert!(id.contains('-'));

    let mut consumer = stream.consume::<Order>(0);
    let order = timeout(Duration::from_secs(5), consumer.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order, Order::new(42));

    let stats = assert_ok!(consumer.stop().await);
    assert_eq!(stats.delivered, 1);
    assert_eq!(stats.last_entry_id.as_deref(), Some(id.as_str()));

    let left = assert_ok!(client.range("orders", "-", None).await);
    assert!(left.is_empty());

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_competing_consumers_split_entries() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("stream-race").await;
    let stream: RedisStream = client.stream(config());

    for order_id in 0..50 {
        assert_ok!(stream.publish(&Order::new(order_id)).await);
    }

    let mut first = stream.consume::<Order>(10);
    let mut second = stream.consume::<Order>(10);

    let mut seen = Vec::new();
    timeout(Duration::from_secs(10), async {
        while seen.len() < 50 {
            tokio::select! {
                Some(order) = first.recv() => seen.push(order.order_id),
                Some(order) = second.recv() => seen.push(order.order_id),
            }
        }
    })
    .await
    .expect("not every entry was delivered");

    let unique: HashSet<u64> = seen.iter().copied().collect();
    assert_eq!(unique.len(), 50);

    let a = assert_ok!(first.stop().await);
    let b = assert_ok!(second.stop().await);
    assert_eq!(a.delivered + b.delivered, 50);

    cleanup(&client).await;
}
