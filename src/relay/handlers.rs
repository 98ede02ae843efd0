//! Handler bodies for each wire message (§4.5).

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::message_store::{IncomingAttachment, Message};
use crate::relay::connection::ConnectionHandle;
use crate::relay::protocol::WireMessage;
use crate::relay::signature::verify_signature;
use crate::relay::{RoomInfo, SigningRelay};

/// Shape of the `message` payload attached to a `broadcast`/`persist`
/// frame; everything MessageStore needs plus optional attachments.
#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    id: String,
    content: String,
    timestamp: i64,
    #[serde(default)]
    attachments: Vec<ChatAttachmentBody>,
}

#[derive(Debug, Deserialize)]
struct ChatAttachmentBody {
    name: String,
    #[serde(rename = "type")]
    content_type: String,
    data: String,
}

impl SigningRelay {
    /// Record the connection under `room`/`user`; reply `room-info` to
    /// the joiner (participants excluding itself) and `user-joined` to
    /// everyone else already in the room.
    pub fn on_join(&self, conn_id: Uuid, room: &str, user: &str) {
        let existing_participants: Vec<String> = self
            .rooms
            .get(room)
            .map(|r| r.participants.iter().cloned().collect())
            .unwrap_or_default();

        self.rooms
            .entry(room.to_string())
            .or_insert_with(|| RoomInfo { name: room.to_string(), participants: Default::default() })
            .participants
            .insert(user.to_string());

        if let Some(mut conn) = self.connections.get_mut(&conn_id) {
            conn.room = Some(room.to_string());
            conn.user = user.to_string();
        }

        self.unicast(
            conn_id,
            &WireMessage::RoomInfo { participants: existing_participants, room: room.to_string() },
        );

        self.broadcast_to_room_except(
            room,
            conn_id,
            &WireMessage::UserJoined { user: user.to_string(), room: room.to_string() },
        );
    }

    /// Forward an `offer`/`answer`/`ice-candidate` to the unique
    /// connection matching `target` in the sender's room. Drop with a
    /// log if no such connection exists.
    pub fn on_signaling(&self, sender_id: Uuid, target: &str, room: &str, message: WireMessage) {
        let Some(target_id) = self.find_connection_by_name(room, target) else {
            tracing::warn!(target, room, "signaling target not found, dropping");
            return;
        };

        let stamped = stamp_sender_and_room(message, self.name_of(sender_id), room.to_string());
        self.unicast(target_id, &stamped);
    }

    /// Verify the signature, check the blocklist, fire-and-forget persist,
    /// then fan out to every other connection in the room.
    pub async fn on_broadcast(
        &self,
        sender_id: Uuid,
        room: &str,
        message: serde_json::Value,
        public_key: Option<&str>,
        signature: Option<&str>,
    ) {
        let (Some(public_key), Some(signature)) = (public_key, signature) else {
            tracing::warn!("broadcast missing signature, dropping");
            return;
        };

        if verify_signature(&message, public_key, signature).is_err() {
            tracing::warn!(public_key, "broadcast signature invalid, dropping");
            return;
        }

        if self.is_blocked(public_key) {
            tracing::warn!(public_key, "broadcast from blocked publisher, dropping");
            return;
        }

        let sender_name = self.name_of(sender_id);

        let messages = self.messages.clone();
        let room_owned = room.to_string();
        let message_for_persist = message.clone();
        let public_key_owned = public_key.to_string();
        let signature_owned = signature.to_string();
        let sender_owned = sender_name.clone();
        tokio::spawn(async move {
            if let Err(err) = persist_broadcast(
                &messages,
                &room_owned,
                &message_for_persist,
                &sender_owned,
                &public_key_owned,
                &signature_owned,
            )
            .await
            {
                tracing::error!(error = %err, "broadcast persistence failed");
            }
        });

        let stamped = WireMessage::Broadcast {
            room: room.to_string(),
            message,
            sender: Some(sender_name),
            public_key: Some(public_key.to_string()),
            signature: Some(signature.to_string()),
        };
        self.broadcast_to_room_except(room, sender_id, &stamped);
    }

    /// Delete via MessageStore (authorization enforced there) and notify
    /// the room so UIs can remove the entry locally.
    pub async fn on_delete_message(&self, room: &str, message_id: &str, requester_pub_key: &str) -> Result<()> {
        self.messages
            .delete_message(message_id, requester_pub_key, self.admin_public_key.as_deref())
            .await?;

        self.broadcast_to_room(
            room,
            &WireMessage::DeleteMsg {
                message_id: message_id.to_string(),
                room: room.to_string(),
                public_key: None,
                signature: None,
            },
        );
        Ok(())
    }

    /// Remove the connection from both registries; drop an empty room or
    /// notify the remaining members.
    pub fn on_close(&self, conn_id: Uuid) {
        let Some((_, conn)) = self.connections.remove(&conn_id) else {
            return;
        };

        let Some(room) = conn.room else {
            return;
        };

        let mut drop_room = false;
        if let Some(mut room_info) = self.rooms.get_mut(&room) {
            room_info.participants.remove(&conn.user);
            drop_room = room_info.participants.is_empty();
        }

        if drop_room {
            self.rooms.remove(&room);
        } else {
            self.broadcast_to_room(&room, &WireMessage::UserLeft { user: conn.user, room });
        }
    }

    fn name_of(&self, conn_id: Uuid) -> String {
        self.connections.get(&conn_id).map(|c| c.user.clone()).unwrap_or_default()
    }

    fn find_connection_by_name(&self, room: &str, name: &str) -> Option<Uuid> {
        self.connections
            .iter()
            .find(|entry| entry.room.as_deref() == Some(room) && entry.user == name)
            .map(|entry| *entry.key())
    }

    fn unicast(&self, conn_id: Uuid, message: &WireMessage) {
        if let Some(conn) = self.connections.get(&conn_id) {
            if let Err(err) = conn.send(message) {
                tracing::error!(error = %err, "failed to serialize outbound message");
            }
        }
    }

    /// Fan out to every connection currently in `room`, over a snapshot
    /// of the registry (§5: avoid concurrent-modification during
    /// iteration).
    fn broadcast_to_room(&self, room: &str, message: &WireMessage) {
        let recipients: Vec<Uuid> = self
            .connections
            .iter()
            .filter(|entry| entry.room.as_deref() == Some(room))
            .map(|entry| *entry.key())
            .collect();

        for id in recipients {
            self.unicast(id, message);
        }
    }

    fn broadcast_to_room_except(&self, room: &str, except: Uuid, message: &WireMessage) {
        let recipients: Vec<Uuid> = self
            .connections
            .iter()
            .filter(|entry| *entry.key() != except && entry.room.as_deref() == Some(room))
            .map(|entry| *entry.key())
            .collect();

        for id in recipients {
            self.unicast(id, message);
        }
    }
}

fn stamp_sender_and_room(message: WireMessage, sender: String, room: String) -> WireMessage {
    match message {
        WireMessage::Offer { target, offer, public_key, signature, .. } => {
            WireMessage::Offer { target, offer, room, public_key, signature, sender: Some(sender) }
        }
        WireMessage::Answer { target, answer, .. } => {
            WireMessage::Answer { target, answer, room: Some(room), sender: Some(sender) }
        }
        WireMessage::IceCandidate { target, candidate, .. } => {
            WireMessage::IceCandidate { target, candidate, room: Some(room), sender: Some(sender) }
        }
        other => other,
    }
}

async fn persist_broadcast(
    messages: &crate::message_store::MessageStore,
    room: &str,
    message: &serde_json::Value,
    sender: &str,
    public_key: &str,
    signature: &str,
) -> Result<()> {
    let body: ChatMessageBody =
        serde_json::from_value(message.clone()).map_err(|e| Error::Internal(crate::error::InternalCause::Json(e)))?;

    let record = Message {
        id: body.id,
        room_id: 0,
        state: "SAVED".to_string(),
        timestamp: body.timestamp,
        sender: sender.to_string(),
        content: body.content,
        public_key: public_key.to_string(),
        signature: signature.to_string(),
    };

    let attachments: Vec<IncomingAttachment> = body
        .attachments
        .into_iter()
        .map(|a| IncomingAttachment { name: a.name, content_type: a.content_type, data_url: a.data })
        .collect();

    messages.persist(room, &record, &attachments).await
}
