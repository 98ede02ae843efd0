//! SigningRelay (§4.5): room membership registry, targeted signaling
//! relay, and persisted broadcast with signature verification and a
//! publisher blocklist.
//!
//! The registries are mutated only from within each connection's own
//! handler invocations (never from a second thread touching them
//! directly), so a `dashmap` — sharded, lock-striped maps — gives the
//! same single-owner-at-a-time guarantee §5 asks for without a single
//! global mutex serializing unrelated rooms.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod signature;

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::message_store::MessageStore;
use connection::ConnectionHandle;

/// `room_name → RoomInfo{name, participants}` (§3.3).
pub struct RoomInfo {
    pub name: String,
    pub participants: HashSet<String>,
}

/// The relay's live state: connection registry, room registry, and the
/// collaborators it persists through and checks against.
pub struct SigningRelay {
    connections: DashMap<Uuid, ConnectionHandle>,
    rooms: DashMap<String, RoomInfo>,
    messages: Arc<MessageStore>,
    blocked_keys: DashMap<String, ()>,
    admin_public_key: Option<String>,
}

impl SigningRelay {
    pub fn new(messages: Arc<MessageStore>, admin_public_key: Option<String>) -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
            messages,
            blocked_keys: DashMap::new(),
            admin_public_key,
        }
    }

    /// Register a newly accepted connection. Call before dispatching any
    /// wire messages for it.
    pub fn register(&self, id: Uuid, handle: ConnectionHandle) {
        self.connections.insert(id, handle);
    }

    pub fn is_blocked(&self, public_key: &str) -> bool {
        self.blocked_keys.contains_key(public_key)
    }

    pub fn block(&self, public_key: String) {
        self.blocked_keys.insert(public_key, ());
    }
}
