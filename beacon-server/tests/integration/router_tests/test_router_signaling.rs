use beacon_core::{Payload, PeerId, RoomId, ServerEvent};
use beacon_server::RelayCommand;
use serde_json::json;

use crate::integration::{create_test_router, init_tracing};
use crate::utils::flush;

async fn join(cmd_tx: &tokio::sync::mpsc::Sender<RelayCommand>, peer: &PeerId, room: &str) {
    cmd_tx
        .send(RelayCommand::Join {
            peer_id: peer.clone(),
            room_id: RoomId::from(room),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_router_signal_reaches_only_target() {
    init_tracing();

    let (cmd_tx, _signal_rx, signaling) = create_test_router();
    let (a, b, c) = (PeerId::from("A"), PeerId::from("B"), PeerId::from("C"));
    for peer in [&a, &b, &c] {
        signaling.connect(peer).await;
        join(&cmd_tx, peer, "r1").await;
    }
    flush(&cmd_tx).await;
    let before = signaling.delivered_count().await;

    cmd_tx
        .send(RelayCommand::Signal {
            from: a.clone(),
            to: c.clone(),
            data: Payload(json!({ "sdp": "answer" })),
        })
        .await
        .unwrap();
    flush(&cmd_tx).await;

    assert_eq!(signaling.delivered_count().await, before + 1);
    assert_eq!(
        signaling.events_for(&c).await.last(),
        Some(&ServerEvent::Signal {
            from: a.clone(),
            data: Payload(json!({ "sdp": "answer" })),
        })
    );
}

#[tokio::test]
async fn test_router_signal_to_dead_connection_is_dropped() {
    init_tracing();

    let (cmd_tx, _signal_rx, signaling) = create_test_router();
    let (a, b) = (PeerId::from("A"), PeerId::from("B"));
    for peer in [&a, &b] {
        signaling.connect(peer).await;
        join(&cmd_tx, peer, "r1").await;
    }
    flush(&cmd_tx).await;

    // Socket gone but the router has not processed the disconnect yet
    signaling.drop_connection(&b).await;
    let before = signaling.delivered_count().await;

    cmd_tx
        .send(RelayCommand::Signal {
            from: a.clone(),
            to: b.clone(),
            data: Payload(json!("lost")),
        })
        .await
        .unwrap();
    flush(&cmd_tx).await;

    assert_eq!(signaling.delivered_count().await, before);
}

#[tokio::test]
async fn test_router_broadcast_excludes_sender_and_other_rooms() {
    init_tracing();

    let (cmd_tx, _signal_rx, signaling) = create_test_router();
    let (a, b, c) = (PeerId::from("A"), PeerId::from("B"), PeerId::from("C"));
    for (peer, room) in [(&a, "r1"), (&b, "r1"), (&c, "r2")] {
        signaling.connect(peer).await;
        join(&cmd_tx, peer, room).await;
    }

    cmd_tx
        .send(RelayCommand::Broadcast {
            from: a.clone(),
            payload: Payload(json!({ "kind": "presence" })),
        })
        .await
        .unwrap();
    flush(&cmd_tx).await;

    let tagged = ServerEvent::Broadcast(Payload(json!({ "from": "A", "kind": "presence" })));
    assert!(signaling.events_for(&b).await.contains(&tagged));
    assert!(!signaling.events_for(&a).await.contains(&tagged));
    assert!(!signaling.events_for(&c).await.contains(&tagged));
}
