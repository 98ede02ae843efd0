use std::sync::Arc;

use parchment::message_store::MessageStore;
use parchment::relay::connection::ConnectionHandle;
use parchment::relay::SigningRelay;
use parchment::store::Store;
use sqlx::PgPool;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Boot a `SigningRelay` over a fresh schema; the membership tests never
/// issue a query, but `SigningRelay` owns a `MessageStore` which needs a
/// real pool to construct.
pub async fn relay(pool: PgPool) -> Arc<SigningRelay> {
    let store = Arc::new(Store::from_pool(pool));
    store.bootstrap().await.expect("bootstrap schema");
    let messages = Arc::new(MessageStore::new(store));
    Arc::new(SigningRelay::new(messages, Some("admin-key".to_string())))
}

/// Register a connection named `user` and return its id plus an
/// inbound receiver to observe what the relay sent it.
pub fn register(relay: &SigningRelay, user: &str) -> (Uuid, mpsc::UnboundedReceiver<tokio_tungstenite::tungstenite::Message>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let id = Uuid::new_v4();
    relay.register(id, ConnectionHandle::new(user.to_string(), tx));
    (id, rx)
}
