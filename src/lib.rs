//! Parchment: a multi-tenant virtual file system and WebRTC signaling
//! relay backed by Postgres.

pub mod config;
pub mod doc_service;
pub mod error;
pub mod message_store;
pub mod relay;
pub mod store;
pub mod tx_scope;
pub mod vfs;

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::Config;
use crate::message_store::MessageStore;
use crate::relay::connection::{run_writer, ConnectionHandle};
use crate::relay::protocol::WireMessage;
use crate::relay::SigningRelay;
use crate::store::Store;

/// Accept WebSocket connections forever, dispatching each to its own
/// task. Mirrors the teacher's `handle_forever`/`process_socket` shape:
/// one accept loop, one task per connection, a dedicated writer task per
/// connection draining an outbound channel.
pub async fn handle_forever(listener: TcpListener, relay: Arc<SigningRelay>) -> std::io::Result<()> {
    loop {
        let (socket, _) = listener.accept().await?;
        socket.set_nodelay(true)?;

        let relay = Arc::clone(&relay);
        tokio::spawn(async move {
            if let Err(err) = process_socket(socket, relay).await {
                tracing::warn!(error = %err, "connection closed with error");
            }
        });
    }
}

/// Bootstrap `Store` and `SigningRelay` from `config` and bind the
/// accept loop. Used by the CLI binary.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(Store::connect(&config).await?);
    store.bootstrap().await?;

    let messages = Arc::new(MessageStore::new(Arc::clone(&store)));
    let relay = Arc::new(SigningRelay::new(messages, Some(config.admin_public_key.clone())));

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    handle_forever(listener, relay).await?;
    Ok(())
}

async fn process_socket(socket: TcpStream, relay: Arc<SigningRelay>) -> anyhow::Result<()> {
    let ws_stream = tokio_tungstenite::accept_async(socket).await?;
    let (sink, mut stream) = ws_stream.split();

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_writer(sink, outbound_rx));

    let conn_id = Uuid::new_v4();
    relay.register(conn_id, ConnectionHandle::new(String::new(), outbound_tx));

    while let Some(frame) = stream.next().await {
        let frame = frame?;
        if !frame.is_text() {
            continue;
        }

        let text = frame.into_text()?;
        match serde_json::from_str::<WireMessage>(&text) {
            Ok(message) => dispatch(&relay, conn_id, message).await,
            Err(err) => tracing::warn!(error = %err, "dropping malformed frame"),
        }
    }

    relay.on_close(conn_id);
    Ok(())
}

async fn dispatch(relay: &SigningRelay, conn_id: Uuid, message: WireMessage) {
    match message {
        WireMessage::Join { room, user, .. } => relay.on_join(conn_id, &room, &user),
        WireMessage::Offer { ref target, room, .. } => {
            let target = target.clone();
            relay.on_signaling(conn_id, &target, &room, message);
        }
        WireMessage::Answer { ref target, room, .. } => {
            let target = target.clone();
            let room = room.unwrap_or_default();
            relay.on_signaling(conn_id, &target, &room, message);
        }
        WireMessage::IceCandidate { ref target, room, .. } => {
            let target = target.clone();
            let room = room.unwrap_or_default();
            relay.on_signaling(conn_id, &target, &room, message);
        }
        WireMessage::Broadcast { room, message, public_key, signature, .. } => {
            relay
                .on_broadcast(conn_id, &room, message, public_key.as_deref(), signature.as_deref())
                .await;
        }
        WireMessage::DeleteMsg { message_id, room, public_key, .. } => {
            let Some(public_key) = public_key else {
                tracing::warn!("delete-msg missing publicKey, dropping");
                return;
            };
            if let Err(err) = relay.on_delete_message(&room, &message_id, &public_key).await {
                tracing::warn!(error = %err, "delete-msg failed");
            }
        }
        WireMessage::Ack { .. }
        | WireMessage::RoomInfo { .. }
        | WireMessage::UserJoined { .. }
        | WireMessage::UserLeft { .. }
        | WireMessage::Persist { .. } => {
            tracing::debug!("ignoring server-originated message type from client");
        }
    }
}
