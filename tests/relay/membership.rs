use sqlx::PgPool;
use tokio_tungstenite::tungstenite::Message;

use crate::common::{register, relay};

fn recv_text(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Message>) -> String {
    match rx.try_recv().expect("expected a queued message") {
        Message::Text(text) => text,
        other => panic!("expected text frame, got {other:?}"),
    }
}

#[sqlx::test]
async fn on_join_sends_room_info_excluding_joiner(pool: PgPool) {
    let relay = relay(pool).await;
    let (first_id, mut first_rx) = register(&relay, "alice");
    relay.on_join(first_id, "lobby", "alice");
    let first_frame = recv_text(&mut first_rx);
    assert!(first_frame.contains("\"participants\":[]"));

    let (second_id, mut second_rx) = register(&relay, "bob");
    relay.on_join(second_id, "lobby", "bob");

    let joiner_frame = recv_text(&mut second_rx);
    assert!(joiner_frame.contains("alice"));

    let notified_frame = recv_text(&mut first_rx);
    assert!(notified_frame.contains("user-joined"));
    assert!(notified_frame.contains("bob"));
}

#[sqlx::test]
async fn on_close_notifies_remaining_members(pool: PgPool) {
    let relay = relay(pool).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    let _ = recv_text(&mut alice_rx);

    let (bob_id, mut bob_rx) = register(&relay, "bob");
    relay.on_join(bob_id, "lobby", "bob");
    let _ = recv_text(&mut bob_rx);
    let _ = recv_text(&mut alice_rx);

    relay.on_close(bob_id);

    let left_frame = recv_text(&mut alice_rx);
    assert!(left_frame.contains("user-left"));
    assert!(left_frame.contains("bob"));
}

#[sqlx::test]
async fn on_close_drops_empty_room(pool: PgPool) {
    let relay = relay(pool).await;
    let (alice_id, mut alice_rx) = register(&relay, "alice");
    relay.on_join(alice_id, "lobby", "alice");
    let _ = recv_text(&mut alice_rx);

    relay.on_close(alice_id);

    let (bob_id, mut bob_rx) = register(&relay, "bob");
    relay.on_join(bob_id, "lobby", "bob");
    let room_info = recv_text(&mut bob_rx);
    assert!(room_info.contains("\"participants\":[]"));
}
