//! Key-value operations against a live server

use crate::common::{REDIS_URL_VAR, cleanup, live_client};
use crate::{assert_ok, skip_without_env};
use redis_kit::KeyTtl;
use std::time::Duration;

#[tokio::test]
#[ignore]
async fn test_cache_roundtrip_uses_prefix() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("cache").await;

    assert_ok!(client.set("greeting", "hello", None).await);
    assert_eq!(assert_ok!(client.get("greeting").await).as_deref(), Some("hello"));
    assert!(assert_ok!(client.has("greeting").await));
    assert_eq!(assert_ok!(client.get("missing").await), None);

    let raw: Option<String> = assert_ok!(client.get_as::<String>("greeting").await);
    assert_eq!(raw.as_deref(), Some("hello"));
    assert!(client.key("greeting").starts_with(client.prefix()));

    assert_eq!(assert_ok!(client.exists(&["greeting", "missing"]).await), 1);
    assert_eq!(assert_ok!(client.delete(&["greeting", "missing"]).await), 1);
    assert!(!assert_ok!(client.has("greeting").await));

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_ttl_states() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("ttl").await;

    assert_eq!(assert_ok!(client.ttl("nothing").await), KeyTtl::Missing);

    assert_ok!(client.set("forever", 1, None).await);
    assert_eq!(assert_ok!(client.ttl("forever").await), KeyTtl::Persistent);

    assert_ok!(client.set("session", "abc", Some(Duration::from_secs(60))).await);
    match assert_ok!(client.ttl("session").await) {
        KeyTtl::Expires(left) => assert!(left <= Duration::from_secs(60)),
        other => panic!("unexpected ttl: {:?}", other),
    }

    assert!(assert_ok!(client.expire("forever", Duration::from_secs(30)).await));
    assert!(!assert_ok!(client.expire("nothing", Duration::from_secs(30)).await));

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_counters_lists_and_sets() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("collections").await;

    assert_eq!(assert_ok!(client.incr("hits").await), 1);
    assert_eq!(assert_ok!(client.incr_by("hits", 9).await), 10);
    assert_eq!(assert_ok!(client.decr_by("hits", 4).await), 6);

    assert_eq!(assert_ok!(client.rpush("queue", &["a", "b", "c"]).await), 3);
    assert_eq!(assert_ok!(client.lpush("queue", &["z"]).await), 4);
    assert_eq!(assert_ok!(client.lrange("queue", 0, -1).await), vec!["z", "a", "b", "c"]);
    assert_eq!(assert_ok!(client.lrem("queue", 0, "b").await), 1);
    assert_eq!(assert_ok!(client.lpop("queue").await).as_deref(), Some("z"));
    assert_eq!(assert_ok!(client.rpop("queue").await).as_deref(), Some("c"));
    assert_eq!(assert_ok!(client.llen("queue").await), 1);
    assert_eq!(assert_ok!(client.lpop("empty").await), None);

    assert_eq!(assert_ok!(client.sadd("tags", &["x", "y", "x"]).await), 2);
    assert!(assert_ok!(client.sismember("tags", "x").await));
    let mut members: Vec<String> = assert_ok!(client.smembers("tags").await);
    members.sort();
    assert_eq!(members, vec!["x", "y"]);
    assert_eq!(assert_ok!(client.srem("tags", &["y"]).await), 1);
    assert_eq!(assert_ok!(client.spop("tags").await).as_deref(), Some("x"));
    assert_eq!(assert_ok!(client.spop("tags").await), None);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_hashes_and_sorted_sets() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("hashes").await;

    assert_eq!(assert_ok!(client.hset("user:1", &[("name", "ada"), ("lang", "en")]).await), 2);
    assert_eq!(assert_ok!(client.hset("user:1", &[("lang", "fr")]).await), 0);
    assert_eq!(assert_ok!(client.hget("user:1", "lang").await).as_deref(), Some("fr"));
    assert!(assert_ok!(client.hexists("user:1", "name").await));
    assert_eq!(assert_ok!(client.hincrby("user:1", "logins", 2).await), 2);
    assert_eq!(assert_ok!(client.hgetall("user:1").await).len(), 3);
    assert_eq!(assert_ok!(client.hdel("user:1", &["logins"]).await), 1);

    let added = assert_ok!(
        client
            .zadd("board", &[(3.0, "carol"), (1.0, "alice"), (2.0, "bob")])
            .await
    );
    assert_eq!(added, 3);
    assert_eq!(
        assert_ok!(client.zrange_by_score("board", 1.0, 2.0).await),
        vec!["alice", "bob"]
    );

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_wrong_type_is_classified() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("wrongtype").await;

    assert_ok!(client.set("plain", "v", None).await);
    let err = client.lpush("plain", &["x"]).await.unwrap_err();
    assert!(err.is_wrong_type());

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_batch_delete_only_touches_prefix() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("batch").await;
    let other = live_client("batch-other").await;

    for i in 0..250 {
        assert_ok!(client.set(&format!("tmp:{}", i), i, None).await);
    }
    assert_ok!(client.set("keep", 1, None).await);
    assert_ok!(other.set("tmp:1", 1, None).await);

    assert_eq!(assert_ok!(client.batch_delete("tmp:*", None).await), 250);
    assert!(assert_ok!(client.has("keep").await));
    assert!(assert_ok!(other.has("tmp:1").await));

    cleanup(&client).await;
    cleanup(&other).await;
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    skip_without_env!(REDIS_URL_VAR);
    let client = live_client("health").await;
    assert_eq!(assert_ok!(client.ping().await), "PONG");
    assert_ok!(client.health_check().await);
    assert!(!client.is_cluster());
    assert_ok!(client.close().await);
}
