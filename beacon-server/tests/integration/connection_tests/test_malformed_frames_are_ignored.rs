use crate::integration::{init_tracing, spawn_relay};

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    init_tracing();

    let relay = spawn_relay().await;
    let mut a = relay.client().await;

    a.send_raw("definitely not json").await.unwrap();
    a.send_raw(r#"{"event":"teleport","data":"mars"}"#).await.unwrap();
    a.expect_silence().await.expect("Bad frames get no reply");

    // The connection is still usable afterwards
    let peers = a.join("r1").await.expect("Join failed");
    assert!(peers.is_empty());
}
