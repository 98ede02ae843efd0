use serde_json::json;
use sqlx::PgPool;
use tokio_tungstenite::tungstenite::Message;

use crate::common::{register, relay};

#[sqlx::test]
async fn on_signaling_forwards_offer_to_named_target(pool: PgPool) {
    let relay = relay(pool).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    alice_rx.try_recv().unwrap();

    let (bob_id, mut bob_rx) = register(&relay, "bob");
    relay.on_join(bob_id, "lobby", "bob");
    bob_rx.try_recv().unwrap();
    alice_rx.try_recv().unwrap();

    let offer = parchment::relay::protocol::WireMessage::Offer {
        target: "bob".to_string(),
        offer: json!({ "sdp": "..." }),
        room: "lobby".to_string(),
        public_key: None,
        signature: None,
        sender: None,
    };
    relay.on_signaling(alice_id, "bob", "lobby", offer);

    match bob_rx.try_recv().unwrap() {
        Message::Text(text) => {
            assert!(text.contains("\"type\":\"offer\""));
            assert!(text.contains("\"sender\":\"alice\""));
        }
        other => panic!("expected text frame, got {other:?}"),
    }
}

#[sqlx::test]
async fn on_signaling_drops_silently_when_target_missing(pool: PgPool) {
    let relay = relay(pool).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    alice_rx.try_recv().unwrap();

    let offer = parchment::relay::protocol::WireMessage::Offer {
        target: "ghost".to_string(),
        offer: json!({}),
        room: "lobby".to_string(),
        public_key: None,
        signature: None,
        sender: None,
    };
    relay.on_signaling(alice_id, "ghost", "lobby", offer);

    assert!(alice_rx.try_recv().is_err());
}
