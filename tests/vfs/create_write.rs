use parchment::vfs::write::Content;
use sqlx::PgPool;

use crate::common::vfs;

#[sqlx::test]
async fn mkdir_then_write_text_file_roundtrips(pool: PgPool) {
    let engine = vfs(pool).await;

    let dir = engine.mkdir(1, "usr", "", "docs", None, false).await.unwrap();
    assert_eq!(dir.filename, "docs");
    assert!(dir.is_directory);

    let file = engine
        .write_file(1, "usr", "docs", "notes.md", Content::Text("hello".into()), None, "text/markdown", false)
        .await
        .unwrap();
    assert_eq!(file.ordinal, 0);

    let bytes = engine.read_file(1, "usr", "docs", "notes.md").await.unwrap();
    assert_eq!(bytes, b"hello");
}

#[sqlx::test]
async fn mkdir_rejects_duplicate_name(pool: PgPool) {
    let engine = vfs(pool).await;

    engine.mkdir(1, "usr", "", "docs", None, false).await.unwrap();
    let err = engine.mkdir(1, "usr", "", "docs", None, false).await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::AlreadyExists(_)));
}

#[sqlx::test]
async fn write_file_creates_missing_parent_directories(pool: PgPool) {
    let engine = vfs(pool).await;

    engine
        .write_file(1, "usr", "a/b/c", "deep.md", Content::Text("x".into()), None, "text/markdown", false)
        .await
        .unwrap();

    assert!(engine.exists("usr", "", "a").await.unwrap());
    assert!(engine.exists("usr", "a", "b").await.unwrap());
    assert!(engine.exists("usr", "a/b", "c").await.unwrap());
    assert!(engine.exists("usr", "a/b/c", "deep.md").await.unwrap());
}

#[sqlx::test]
async fn read_file_denies_non_owner_non_public(pool: PgPool) {
    let engine = vfs(pool).await;

    engine
        .write_file(1, "usr", "", "private.md", Content::Text("secret".into()), None, "text/markdown", false)
        .await
        .unwrap();

    let err = engine.read_file(2, "usr", "", "private.md").await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::NotAuthorized));
}

#[sqlx::test]
async fn read_file_allows_admin_and_public(pool: PgPool) {
    let engine = vfs(pool).await;

    engine
        .write_file(1, "usr", "", "private.md", Content::Text("secret".into()), None, "text/markdown", false)
        .await
        .unwrap();

    assert!(engine.read_file(0, "usr", "", "private.md").await.is_ok());

    engine.set_public(1, "usr", "", "private.md", true).await.unwrap();
    assert!(engine.read_file(2, "usr", "", "private.md").await.is_ok());
}
