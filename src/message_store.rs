//! MessageStore (§4.6): per-room message persistence with attachments.

use base64::Engine;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::tx_scope::run_trans;

/// One stored chat message, `SAVED` the moment it is read back from
/// storage (§3.2).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: String,
    pub room_id: i64,
    pub state: String,
    pub timestamp: i64,
    pub sender: String,
    pub content: String,
    pub public_key: String,
    pub signature: String,
}

/// One attachment row, child of a [`Message`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    pub id: i64,
    pub message_id: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub content_type: String,
    pub size: i64,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
}

/// A message plus its attachments, grouped for delivery to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MessageWithAttachments {
    #[serde(flatten)]
    pub message: Message,
    pub attachments: Vec<Attachment>,
}

/// An attachment as received from the wire: `data` may be a raw
/// `data:...;base64,...` URL that must be decoded before storage.
pub struct IncomingAttachment {
    pub name: String,
    pub content_type: String,
    pub data_url: String,
}

pub struct MessageStore {
    store: Arc<Store>,
}

impl MessageStore {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Insert-or-ignore the room, insert-or-ignore the message by its
    /// client-chosen id (at-most-once), and insert one attachment row per
    /// decoded payload. All in one TxScope.
    pub async fn persist(
        &self,
        room: &str,
        message: &Message,
        attachments: &[IncomingAttachment],
    ) -> Result<()> {
        let store = Arc::clone(&self.store);
        let room = room.to_string();
        let message = message.clone();
        let attachments: Vec<(String, String, Vec<u8>)> = attachments
            .iter()
            .map(|a| {
                let bytes = decode_data_url(&a.data_url)?;
                Ok((a.name.clone(), a.content_type.clone(), bytes))
            })
            .collect::<Result<Vec<_>>>()?;

        run_trans(&store, || async {
            let room_id: i64 = self
                .store
                .with_conn({
                    let room = room.clone();
                    move |conn| {
                        Box::pin(async move {
                            sqlx::query_scalar(
                                "INSERT INTO rooms (name) VALUES ($1) \
                                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
                                 RETURNING id",
                            )
                            .bind(room)
                            .fetch_one(conn)
                            .await
                        })
                    }
                })
                .await?;

            self.store
                .with_conn({
                    let message = message.clone();
                    move |conn| {
                        Box::pin(async move {
                            sqlx::query(
                                "INSERT INTO messages (id, room_id, state, timestamp, sender, content, public_key, signature) \
                                 VALUES ($1, $2, 'SAVED', $3, $4, $5, $6, $7) \
                                 ON CONFLICT (id) DO NOTHING",
                            )
                            .bind(&message.id)
                            .bind(room_id)
                            .bind(message.timestamp)
                            .bind(&message.sender)
                            .bind(&message.content)
                            .bind(&message.public_key)
                            .bind(&message.signature)
                            .execute(conn)
                            .await
                        })
                    }
                })
                .await?;

            for (name, content_type, data) in &attachments {
                let message_id = message.id.clone();
                let name = name.clone();
                let content_type = content_type.clone();
                let size = data.len() as i64;
                let data = data.clone();
                self.store
                    .with_conn(move |conn| {
                        Box::pin(async move {
                            sqlx::query(
                                "INSERT INTO attachments (message_id, name, type, size, data) \
                                 VALUES ($1, $2, $3, $4, $5)",
                            )
                            .bind(message_id)
                            .bind(name)
                            .bind(content_type)
                            .bind(size)
                            .bind(data)
                            .execute(conn)
                            .await
                        })
                    })
                    .await?;
            }

            Ok(())
        })
        .await
    }

    /// Messages (with attachments) whose id is in `ids` and whose
    /// `room_id` matches `room` (security filter: ids from another room
    /// are silently excluded).
    pub async fn get_messages_by_ids(&self, ids: &[String], room: &str) -> Result<Vec<MessageWithAttachments>> {
        let room = room.to_string();
        let ids = ids.to_vec();

        let messages: Vec<Message> = self
            .store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, Message>(
                        "SELECT m.* FROM messages m \
                         JOIN rooms r ON r.id = m.room_id \
                         WHERE r.name = $1 AND m.id = ANY($2) \
                         ORDER BY m.timestamp ASC",
                    )
                    .bind(room)
                    .bind(ids)
                    .fetch_all(conn)
                    .await
                })
            })
            .await?;

        let mut result = Vec::with_capacity(messages.len());
        for message in messages {
            let message_id = message.id.clone();
            let attachments: Vec<Attachment> = self
                .store
                .with_conn(move |conn| {
                    Box::pin(async move {
                        sqlx::query_as::<_, Attachment>("SELECT * FROM attachments WHERE message_id = $1")
                            .bind(message_id)
                            .fetch_all(conn)
                            .await
                    })
                })
                .await?;
            result.push(MessageWithAttachments { message, attachments });
        }

        Ok(result)
    }

    /// Ids of every message in `room` with `timestamp >= cutoff_ms`.
    pub async fn get_message_ids_for_room_since(&self, room: &str, cutoff_ms: i64) -> Result<Vec<String>> {
        let room = room.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_scalar(
                        "SELECT m.id FROM messages m JOIN rooms r ON r.id = m.room_id \
                         WHERE r.name = $1 AND m.timestamp >= $2 ORDER BY m.timestamp ASC",
                    )
                    .bind(room)
                    .bind(cutoff_ms)
                    .fetch_all(conn)
                    .await
                })
            })
            .await
    }

    /// Delete `message_id` (attachments first, then the message) iff
    /// `requester_pub_key` matches the stored public key or `admin_pub_key`.
    pub async fn delete_message(
        &self,
        message_id: &str,
        requester_pub_key: &str,
        admin_pub_key: Option<&str>,
    ) -> Result<()> {
        let store = Arc::clone(&self.store);
        let message_id = message_id.to_string();
        let requester_pub_key = requester_pub_key.to_string();
        let admin_pub_key = admin_pub_key.map(String::from);

        run_trans(&store, || async {
            let id_for_lookup = message_id.clone();
            let stored_key: Option<String> = self
                .store
                .with_conn(move |conn| {
                    Box::pin(async move {
                        sqlx::query_scalar("SELECT public_key FROM messages WHERE id = $1")
                            .bind(id_for_lookup)
                            .fetch_optional(conn)
                            .await
                    })
                })
                .await?;

            let Some(stored_key) = stored_key else {
                return Err(Error::NotFound(message_id.clone()));
            };

            let authorized = stored_key == requester_pub_key || admin_pub_key.as_deref() == Some(requester_pub_key.as_str());
            if !authorized {
                return Err(Error::NotAuthorized);
            }

            let id = message_id.clone();
            self.store
                .with_conn(move |conn| {
                    Box::pin(async move { sqlx::query("DELETE FROM attachments WHERE message_id = $1").bind(id).execute(conn).await })
                })
                .await?;

            let id = message_id.clone();
            self.store
                .with_conn(move |conn| Box::pin(async move { sqlx::query("DELETE FROM messages WHERE id = $1").bind(id).execute(conn).await }))
                .await?;

            Ok(())
        })
        .await
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL to raw bytes. Returns the
/// input unchanged (treated as already-raw) if it is not a data URL.
fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    match data_url.split_once("base64,") {
        Some((_, payload)) => base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::Internal(crate::error::InternalCause::Other(e.to_string()))),
        None => Ok(data_url.as_bytes().to_vec()),
    }
}
