use crate::room::RelayService;
use crate::signaling::encode;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ClientEvent, PeerId, ServerEvent};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Upgrade handler for the relay socket. Every connection gets a fresh id.
pub async fn ws_handler(ws: WebSocketUpgrade, State(relay): State<RelayService>) -> impl IntoResponse {
    let peer_id = PeerId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, relay))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, relay: RelayService) {
    info!(peer = %peer_id, "New WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // The welcome must be first on the wire, ahead of anything the router
    // can push once the peer is in the table.
    match encode(&ServerEvent::Welcome(peer_id.clone())) {
        Ok(welcome) => {
            let _ = tx.send(welcome);
        }
        Err(e) => {
            error!(peer = %peer_id, "Failed to encode welcome: {}", e);
            return;
        }
    }
    relay.signaling().add_peer(peer_id.clone(), tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = relay.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match ClientEvent::from_json(text.as_str()) {
                        Ok(event) => {
                            if let Err(e) = relay.dispatch(peer_id.clone(), event).await {
                                error!("Relay died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!(peer = %peer_id, "Invalid client event: {}", e),
                    },
                    Message::Close(_) => break,
                    Message::Binary(_) => debug!(peer = %peer_id, "Ignoring binary frame"),
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    relay.signaling().remove_peer(&peer_id);
    if let Err(e) = relay.disconnect(peer_id.clone()).await {
        debug!(peer = %peer_id, "Disconnect not delivered: {}", e);
    }
    info!(peer = %peer_id, "WebSocket disconnected");
}
