use std::sync::Arc;
use std::time::Duration;

use p256::ecdsa::{signature::Signer, Signature, SigningKey, VerifyingKey};
use parchment::message_store::MessageStore;
use parchment::store::Store;
use rand_core::OsRng;
use serde_json::json;
use sqlx::PgPool;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::common::{register, relay};

fn signed_body(signing_key: &SigningKey) -> (serde_json::Value, String, String) {
    let verifying_key = VerifyingKey::from(signing_key);
    let public_key_hex = hex::encode(verifying_key.to_encoded_point(false).as_bytes());

    let body = json!({ "id": "msg-1", "content": "hello room", "timestamp": 1_700_000_000_000i64 });
    let signing_input = serde_json::to_vec(&body).unwrap();
    let signature: Signature = signing_key.sign(&signing_input);
    let signature_hex = hex::encode(signature.to_der().as_bytes());

    (body, public_key_hex, signature_hex)
}

#[sqlx::test]
async fn on_broadcast_fans_out_and_persists_a_validly_signed_message(pool: PgPool) {
    let relay = relay(pool.clone()).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    alice_rx.try_recv().unwrap();

    let (bob_id, mut bob_rx) = register(&relay, "bob");
    relay.on_join(bob_id, "lobby", "bob");
    bob_rx.try_recv().unwrap();
    alice_rx.try_recv().unwrap();

    let signing_key = SigningKey::random(&mut OsRng);
    let (body, public_key_hex, signature_hex) = signed_body(&signing_key);

    relay
        .on_broadcast(alice_id, "lobby", body, Some(&public_key_hex), Some(&signature_hex))
        .await;

    match bob_rx.try_recv().unwrap() {
        WsMessage::Text(text) => {
            assert!(text.contains("\"type\":\"broadcast\""));
            assert!(text.contains("\"sender\":\"alice\""));
        }
        other => panic!("expected text frame, got {other:?}"),
    }
    assert!(alice_rx.try_recv().is_err(), "sender should not receive its own broadcast");

    tokio::time::sleep(Duration::from_millis(200)).await;
    let store = Arc::new(Store::from_pool(pool));
    let messages = MessageStore::new(store);
    let ids = messages.get_message_ids_for_room_since("lobby", 0).await.unwrap();
    assert_eq!(ids, vec!["msg-1".to_string()]);
}

#[sqlx::test]
async fn on_broadcast_drops_a_tampered_signature(pool: PgPool) {
    let relay = relay(pool).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    alice_rx.try_recv().unwrap();

    let (bob_id, mut bob_rx) = register(&relay, "bob");
    relay.on_join(bob_id, "lobby", "bob");
    bob_rx.try_recv().unwrap();
    alice_rx.try_recv().unwrap();

    let signing_key = SigningKey::random(&mut OsRng);
    let (_, public_key_hex, signature_hex) = signed_body(&signing_key);
    let tampered = json!({ "id": "msg-2", "content": "not what was signed", "timestamp": 0i64 });

    relay
        .on_broadcast(alice_id, "lobby", tampered, Some(&public_key_hex), Some(&signature_hex))
        .await;

    assert!(bob_rx.try_recv().is_err(), "tampered broadcast must not be forwarded");
}

#[sqlx::test]
async fn on_broadcast_drops_messages_from_blocked_keys(pool: PgPool) {
    let relay = relay(pool).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    alice_rx.try_recv().unwrap();

    let (bob_id, mut bob_rx) = register(&relay, "bob");
    relay.on_join(bob_id, "lobby", "bob");
    bob_rx.try_recv().unwrap();
    alice_rx.try_recv().unwrap();

    let signing_key = SigningKey::random(&mut OsRng);
    let (body, public_key_hex, signature_hex) = signed_body(&signing_key);
    relay.block(public_key_hex.clone());

    relay
        .on_broadcast(alice_id, "lobby", body, Some(&public_key_hex), Some(&signature_hex))
        .await;

    assert!(bob_rx.try_recv().is_err(), "blocked publisher must not reach the room");
}
