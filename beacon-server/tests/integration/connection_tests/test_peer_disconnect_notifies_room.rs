use beacon_core::ServerEvent;

use crate::integration::{init_tracing, spawn_relay};

#[tokio::test]
async fn test_peer_disconnect_notifies_room() {
    init_tracing();

    let relay = spawn_relay().await;

    let mut a = relay.client().await;
    let mut b = relay.client().await;
    let mut c = relay.client().await;

    a.join("r1").await.expect("Join failed");
    b.join("r1").await.expect("Join failed");
    assert_eq!(a.recv().await.unwrap(), ServerEvent::PeerJoined(b.peer_id.clone()));
    c.join("other").await.expect("Join failed");

    let b_id = b.peer_id.clone();
    b.close().await.expect("Failed to close client");

    assert_eq!(a.recv().await.unwrap(), ServerEvent::PeerLeft(b_id));
    c.expect_silence()
        .await
        .expect("Other rooms must not see the departure");

    let stats = relay.relay.stats().await.expect("Relay is down");
    assert_eq!(stats.connections, 2);
    assert_eq!(stats.peers, 2);
}
