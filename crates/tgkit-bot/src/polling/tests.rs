use super::*;
use crate::testing::{bot, text_update, MockTransport};
use futures_util::StreamExt;
use serde_json::json;
use tgkit_core::update::{UpdateContent, UpdateKind};

fn config() -> PollingConfig {
    PollingConfig {
        retry_delay_ms: 0,
        ..Default::default()
    }
}

// --- cursor ---

#[tokio::test]
async fn test_batch_yields_in_order_then_advances_cursor() {
    let mock = MockTransport::new();
    mock.push_updates(&[5, 6, 7]);
    mock.push_updates(&[8]);
    let mut poller = bot(&mock).poller(config());

    assert_eq!(poller.next_update().await.id, 5);
    assert_eq!(poller.next_update().await.id, 6);
    assert_eq!(poller.next_update().await.id, 7);
    assert_eq!(poller.offset(), None, "cursor moves only on the next pull");

    assert_eq!(poller.next_update().await.id, 8);
    assert_eq!(poller.offset(), Some(8));
    assert_eq!(mock.poll_offsets(), vec![None, Some(8)]);
}

#[tokio::test]
async fn test_cursor_is_max_id_plus_one_and_increases() {
    let mock = MockTransport::new();
    mock.push_updates(&[1, 2]);
    mock.push_updates(&[3]);
    mock.push_updates(&[4, 10]);
    mock.push_updates(&[11]);
    let mut poller = bot(&mock).poller(config());

    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push(poller.next_update().await.id);
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 10, 11]);
    let offsets = mock.poll_offsets();
    assert_eq!(offsets, vec![None, Some(3), Some(4), Some(11)]);
    assert!(offsets.windows(2).skip(1).all(|w| w[1] > w[0]));
}

#[tokio::test]
async fn test_empty_batch_leaves_cursor_unchanged() {
    let mock = MockTransport::new();
    mock.push_ok(json!([]));
    mock.push_ok(json!([]));
    mock.push_updates(&[3]);
    let mut poller = bot(&mock).poller(config()).with_offset(3);

    assert_eq!(poller.next_update().await.id, 3);
    assert_eq!(poller.offset(), Some(3));
    assert_eq!(mock.poll_offsets(), vec![Some(3), Some(3), Some(3)]);
}

#[tokio::test]
async fn test_stale_batch_never_moves_cursor_back() {
    let mock = MockTransport::new();
    mock.push_updates(&[2]);
    mock.push_updates(&[20]);
    let mut poller = bot(&mock).poller(config()).with_offset(10);

    assert_eq!(poller.next_update().await.id, 2);
    assert_eq!(poller.next_update().await.id, 20);
    assert_eq!(poller.offset(), Some(10));
    assert_eq!(mock.poll_offsets(), vec![Some(10), Some(10)]);
}

#[tokio::test]
async fn test_abandoned_batch_is_requested_again() {
    let mock = MockTransport::new();
    mock.push_updates(&[5, 6, 7]);
    let mut poller = bot(&mock).poller(config()).with_offset(5);

    assert_eq!(poller.next_update().await.id, 5);
    assert_eq!(poller.next_update().await.id, 6);
    let saved = poller.offset().unwrap();
    drop(poller);
    assert_eq!(saved, 5);

    mock.push_updates(&[5, 6, 7]);
    let mut restarted = bot(&mock).poller(config()).with_offset(saved);
    assert_eq!(restarted.next_update().await.id, 5);
    assert_eq!(mock.poll_offsets(), vec![Some(5), Some(5)]);
}

#[tokio::test]
async fn test_request_carries_limit_and_allowed_updates() {
    let mock = MockTransport::new();
    mock.push_updates(&[1]);
    let mut poller = bot(&mock).poller(PollingConfig {
        limit: 50,
        allowed_updates: vec!["message".into(), "callback_query".into()],
        ..config()
    });

    poller.next_update().await;

    let call = mock.last_call();
    assert_eq!(call.method, "getUpdates");
    assert_eq!(call.body["limit"], 50);
    assert_eq!(call.body["timeout"], 0);
    assert_eq!(call.body["allowed_updates"], json!(["message", "callback_query"]));
    assert!(call.body.get("offset").is_none());
}

// --- connection state ---

#[tokio::test]
async fn test_state_machine_timeouts() {
    let mock = MockTransport::new();
    mock.push_ok(json!([]));
    mock.push_err("connection reset");
    mock.push_ok(json!([]));
    mock.push_updates(&[1]);
    let mut poller = bot(&mock).poller(config());

    assert_eq!(poller.state(), ConnectionState::Disconnected);
    assert_eq!(poller.poll_timeout(), 0);

    assert_eq!(poller.next_update().await.id, 1);
    assert_eq!(mock.poll_timeouts(), vec![0, 60, 10, 60]);
    assert_eq!(poller.state(), ConnectionState::Connected);
    assert_eq!(poller.poll_timeout(), 60);
}

#[tokio::test]
async fn test_api_rejection_counts_as_failed_poll() {
    let mock = MockTransport::new();
    mock.push_ok(json!([]));
    mock.push_api_error(409, "Conflict: terminated by other getUpdates request");
    mock.push_updates(&[2]);
    let mut poller = bot(&mock).poller(config());
    let mut states = poller.subscribe();

    assert_eq!(poller.next_update().await.id, 2);
    assert_eq!(mock.poll_timeouts(), vec![0, 60, 10]);
    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), ConnectionState::Connected);
}

#[tokio::test]
async fn test_configured_timeouts_are_used() {
    let mock = MockTransport::new();
    mock.push_ok(json!([]));
    mock.push_err("timeout");
    mock.push_updates(&[1]);
    let mut poller = bot(&mock).poller(PollingConfig {
        timeout_secs: 25,
        recovery_timeout_secs: 3,
        ..config()
    });

    poller.next_update().await;
    assert_eq!(mock.poll_timeouts(), vec![0, 25, 3]);
}

#[tokio::test]
async fn test_survives_thousand_consecutive_failures() {
    let mock = MockTransport::new();
    for i in 0..1000 {
        if i % 2 == 0 {
            mock.push_err("network unreachable");
        } else {
            mock.push_api_error(502, "Bad Gateway");
        }
    }
    mock.push_updates(&[41, 42]);
    let mut poller = bot(&mock).poller(config());

    assert_eq!(poller.next_update().await.id, 41);
    assert_eq!(poller.next_update().await.id, 42);

    let timeouts = mock.poll_timeouts();
    assert_eq!(timeouts.len(), 1001);
    assert!(timeouts.iter().all(|&t| t == 0));
    assert_eq!(poller.state(), ConnectionState::Connected);
}

// --- decoding ---

#[tokio::test]
async fn test_malformed_payload_is_delivered_as_unknown() {
    let mock = MockTransport::new();
    mock.push_ok(json!([
        {"update_id": 5, "message": "not a message"},
        text_update(6, "hello"),
    ]));
    mock.push_updates(&[7]);
    let mut poller = bot(&mock).poller(config());

    let first = poller.next_update().await;
    assert_eq!(first.id, 5);
    assert!(matches!(first.kind, UpdateKind::Unknown));

    let second = poller.next_update().await;
    assert_eq!(second.content(), UpdateContent::Message);
    assert_eq!(second.message().unwrap().text.as_deref(), Some("hello"));

    poller.next_update().await;
    assert_eq!(mock.poll_offsets(), vec![None, Some(7)]);
}

#[tokio::test]
async fn test_update_without_id_fails_the_poll() {
    let mock = MockTransport::new();
    mock.push_ok(json!([{"message": {}}]));
    mock.push_updates(&[1]);
    let mut poller = bot(&mock).poller(config());

    assert_eq!(poller.next_update().await.id, 1);
    assert_eq!(mock.poll_timeouts(), vec![0, 0]);
}

// --- stream ---

#[tokio::test]
async fn test_stream_delivers_in_order() {
    let mock = MockTransport::new();
    mock.push_updates(&[1, 2]);
    mock.push_updates(&[3]);
    let mut stream = bot(&mock).poller(config()).spawn();

    assert_eq!(stream.next().await.unwrap().id, 1);
    assert_eq!(stream.connection_state(), ConnectionState::Connected);

    let rest: Vec<i64> = (&mut stream).take(2).map(|u| u.id).collect().await;
    assert_eq!(rest, vec![2, 3]);
}

#[tokio::test]
async fn test_stream_abandoned_mid_batch_keeps_cursor() {
    let mock = MockTransport::new();
    mock.push_updates(&[5, 6, 7]);
    let mut stream = bot(&mock).poller(config()).with_offset(5).spawn();

    assert_eq!(stream.next().await.unwrap().id, 5);
    assert_eq!(stream.next().await.unwrap().id, 6);

    let mut poller = stream.into_poller().await.unwrap();
    assert_eq!(poller.offset(), Some(5));

    mock.push_updates(&[5, 6, 7]);
    assert_eq!(poller.next_update().await.id, 5);
    assert_eq!(mock.poll_offsets(), vec![Some(5), Some(5)]);
}

#[tokio::test]
async fn test_stream_waits_for_demand_before_acknowledging_batch() {
    let mock = MockTransport::new();
    mock.push_updates(&[5, 6, 7]);
    let mut stream = bot(&mock).poller(config()).spawn();

    assert_eq!(stream.next().await.unwrap().id, 5);
    assert_eq!(stream.next().await.unwrap().id, 6);
    assert_eq!(stream.next().await.unwrap().id, 7);

    // Still handling 7: no getUpdates with offset 8 may go out yet.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(mock.poll_offsets(), vec![None]);

    mock.push_updates(&[8]);
    assert_eq!(stream.next().await.unwrap().id, 8);
    assert_eq!(mock.poll_offsets(), vec![None, Some(8)]);

    let poller = stream.into_poller().await.unwrap();
    assert_eq!(poller.offset(), Some(8));
}

#[tokio::test]
async fn test_stream_last_item_received_then_dropped_is_redelivered() {
    let mock = MockTransport::new();
    mock.push_updates(&[5, 6]);
    let mut stream = bot(&mock).poller(config()).with_offset(5).spawn();

    assert_eq!(stream.next().await.unwrap().id, 5);
    assert_eq!(stream.next().await.unwrap().id, 6);
    tokio::task::yield_now().await;

    let mut poller = stream.into_poller().await.unwrap();
    assert_eq!(poller.offset(), Some(5));

    mock.push_updates(&[5, 6]);
    assert_eq!(poller.next_update().await.id, 5);
    assert_eq!(mock.poll_offsets(), vec![Some(5), Some(5)]);
}

#[tokio::test]
async fn test_into_poller_interrupts_in_flight_poll() {
    // Nothing scripted: the first long poll never returns.
    let mock = MockTransport::new();
    let mut stream = bot(&mock).poller(config()).spawn();
    let waited = tokio::time::timeout(std::time::Duration::from_millis(20), stream.next()).await;
    assert!(waited.is_err());
    assert_eq!(mock.poll_timeouts(), vec![0]);

    let poller = stream.into_poller().await.unwrap();
    assert_eq!(poller.offset(), None);
    assert_eq!(poller.state(), ConnectionState::Disconnected);
}
