use parchment::vfs::ordinal::Direction;
use parchment::vfs::write::Content;
use sqlx::PgPool;

use crate::common::doc_service;

#[sqlx::test]
async fn join_files_concatenates_in_order_and_deletes_the_rest(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_file(1, "usr", "", "one", "").await.unwrap();
    docs.save_file(1, "usr", "", "one.md", Content::Text("first".into()), None).await.unwrap();
    docs.create_file(1, "usr", "", "two", "one.md").await.unwrap();
    docs.save_file(1, "usr", "", "two.md", Content::Text("second".into()), None).await.unwrap();

    let joined = docs
        .join_files(1, "usr", "", &["one.md".to_string(), "two.md".to_string()])
        .await
        .unwrap();

    assert_eq!(joined.filename, "one.md");
    assert_eq!(joined.content_text.as_deref(), Some("first\nsecond"));
    assert!(!vfs.exists("usr", "", "two.md").await.unwrap());
}

#[sqlx::test]
async fn paste_items_moves_items_and_skips_name_collisions(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_folder(1, "usr", "", "source", "").await.unwrap();
    docs.create_folder(1, "usr", "", "dest", "source").await.unwrap();
    docs.create_file(1, "usr", "source", "a", "").await.unwrap();
    docs.create_file(1, "usr", "source", "b", "a.md").await.unwrap();
    docs.create_file(1, "usr", "dest", "b", "").await.unwrap();

    let outcomes = docs
        .paste_items(1, "usr", "dest", &["source/a.md".to_string(), "source/b.md".to_string()], 0)
        .await
        .unwrap();

    assert!(outcomes[0].moved);
    assert!(!outcomes[1].moved);
    assert!(outcomes[1].diagnostic.is_some());

    assert!(vfs.exists("usr", "dest", "a.md").await.unwrap());
    assert!(!vfs.exists("usr", "source", "a.md").await.unwrap());
    assert!(vfs.exists("usr", "source", "b.md").await.unwrap());
}

#[sqlx::test]
async fn move_up_down_swaps_ordinals_with_the_neighbor(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_file(1, "usr", "", "a", "").await.unwrap();
    docs.create_file(1, "usr", "", "b", "a.md").await.unwrap();

    docs.move_up_down("usr", "", "a.md", Direction::Down).await.unwrap();

    let a = vfs.stat("usr", "", "a.md").await.unwrap().unwrap();
    let b = vfs.stat("usr", "", "b.md").await.unwrap().unwrap();
    assert_eq!(a.ordinal, 1);
    assert_eq!(b.ordinal, 0);
}
