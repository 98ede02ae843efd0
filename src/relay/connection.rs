//! Per-connection outbound channel (§4.5): mirrors the teacher's
//! split-socket / dedicated-writer-task shape, adapted to WebSocket text
//! frames. A failed send to one recipient must never affect others, so
//! sends are fire-and-forget onto an unbounded channel drained by a
//! writer task owning the socket's write half.

use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::WebSocketStream;

use crate::relay::protocol::WireMessage;

pub type WsSink = SplitSink<WebSocketStream<TcpStream>, WsMessage>;

/// The relay's handle onto one live connection: membership state plus an
/// outbound channel to its writer task.
pub struct ConnectionHandle {
    pub room: Option<String>,
    pub user: String,
    outbound: mpsc::UnboundedSender<WsMessage>,
}

impl ConnectionHandle {
    pub fn new(user: String, outbound: mpsc::UnboundedSender<WsMessage>) -> Self {
        Self { room: None, user, outbound }
    }

    /// Serialize and enqueue `message`. Errors (channel closed because the
    /// writer task died) are swallowed by the caller — per §4.5 a failed
    /// send to one recipient must not affect the others.
    pub fn send(&self, message: &WireMessage) -> Result<(), serde_json::Error> {
        let text = serde_json::to_string(message)?;
        let _ = self.outbound.send(WsMessage::Text(text));
        Ok(())
    }
}

/// Drain `receiver` onto `sink` until the channel closes or the socket
/// errors. Spawned once per accepted connection, mirroring the teacher's
/// `StreamWriter::spawn`.
pub async fn run_writer(mut sink: WsSink, mut receiver: mpsc::UnboundedReceiver<WsMessage>) {
    while let Some(message) = receiver.recv().await {
        if sink.send(message).await.is_err() {
            break;
        }
    }
}
