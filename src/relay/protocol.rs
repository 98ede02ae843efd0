//! Wire message taxonomy (§4.5): JSON-over-WebSocket, tagged by `type`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every message the relay sends or receives, tagged by `type` and
/// `camelCase` field names to match the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum WireMessage {
    #[serde(rename = "join")]
    Join {
        room: String,
        user: String,
        #[serde(default)]
        public_key: Option<String>,
        #[serde(default)]
        signature: Option<String>,
    },

    #[serde(rename = "offer")]
    Offer {
        target: String,
        offer: Value,
        room: String,
        #[serde(default)]
        public_key: Option<String>,
        #[serde(default)]
        signature: Option<String>,
        #[serde(default)]
        sender: Option<String>,
    },

    #[serde(rename = "answer")]
    Answer {
        target: String,
        answer: Value,
        #[serde(default)]
        room: Option<String>,
        #[serde(default)]
        sender: Option<String>,
    },

    #[serde(rename = "ice-candidate")]
    IceCandidate {
        target: String,
        candidate: Value,
        #[serde(default)]
        room: Option<String>,
        #[serde(default)]
        sender: Option<String>,
    },

    #[serde(rename = "broadcast")]
    Broadcast {
        room: String,
        message: Value,
        #[serde(default)]
        sender: Option<String>,
        #[serde(default)]
        public_key: Option<String>,
        #[serde(default)]
        signature: Option<String>,
    },

    #[serde(rename = "delete-msg")]
    DeleteMsg {
        message_id: String,
        room: String,
        #[serde(default)]
        public_key: Option<String>,
        #[serde(default)]
        signature: Option<String>,
    },

    #[serde(rename = "ack")]
    Ack { id: String },

    #[serde(rename = "room-info")]
    RoomInfo { participants: Vec<String>, room: String },

    #[serde(rename = "user-joined")]
    UserJoined { user: String, room: String },

    #[serde(rename = "user-left")]
    UserLeft { user: String, room: String },

    #[serde(rename = "persist")]
    Persist { room: String, message: Value },
}
