use beacon_core::{PeerId, ServerEvent};
use beacon_server::RelayCommand;
use tokio::sync::{mpsc, oneshot};

/// Timeout for waiting on a single relayed event (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// How long a client must stay quiet to count as "received nothing" (ms).
pub const SILENCE_MS: u64 = 300;

/// Wait until the router has handled every command sent before this call.
///
/// The router is a FIFO actor, so a `Stats` round-trip acts as a barrier.
pub async fn flush(cmd_tx: &mpsc::Sender<RelayCommand>) {
    let (reply, rx) = oneshot::channel();
    cmd_tx
        .send(RelayCommand::Stats { reply })
        .await
        .expect("Router died");
    rx.await.expect("Router dropped stats reply");
}

/// Sort a peer list so snapshots can be compared regardless of order.
pub fn sorted(mut peers: Vec<PeerId>) -> Vec<PeerId> {
    peers.sort();
    peers
}

/// Extract the peer list of a `peers` event.
pub fn peers_of(event: &ServerEvent) -> Option<Vec<PeerId>> {
    match event {
        ServerEvent::Peers(peers) => Some(sorted(peers.clone())),
        _ => None,
    }
}
