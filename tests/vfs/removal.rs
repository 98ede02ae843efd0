use parchment::vfs::write::Content;
use sqlx::PgPool;

use crate::common::vfs;

#[sqlx::test]
async fn rmdir_non_recursive_fails_on_non_empty(pool: PgPool) {
    let engine = vfs(pool).await;

    engine.mkdir(1, "usr", "", "d", None, false).await.unwrap();
    engine
        .write_file(1, "usr", "d", "f.txt", Content::Text("x".into()), None, "text/plain", false)
        .await
        .unwrap();

    let err = engine.rmdir(1, "usr", "", "d", false, false).await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::NotEmpty(_)));
    assert!(engine.exists("usr", "d", "f.txt").await.unwrap());
}

#[sqlx::test]
async fn rmdir_recursive_deletes_descendants(pool: PgPool) {
    let engine = vfs(pool).await;

    engine.mkdir(1, "usr", "", "d", None, false).await.unwrap();
    engine
        .write_file(1, "usr", "d", "f.txt", Content::Text("x".into()), None, "text/plain", false)
        .await
        .unwrap();

    engine.rmdir(1, "usr", "", "d", true, false).await.unwrap();
    assert!(!engine.exists("usr", "", "d").await.unwrap());
    assert!(!engine.exists("usr", "d", "f.txt").await.unwrap());
}

#[sqlx::test]
async fn rm_refuses_to_delete_logical_root(pool: PgPool) {
    let engine = vfs(pool).await;

    let err = engine.rm(1, "usr", "", false, false).await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::CannotDeleteRoot));
}

#[sqlx::test]
async fn unlink_rejects_non_owner(pool: PgPool) {
    let engine = vfs(pool).await;

    engine
        .write_file(1, "usr", "", "f.txt", Content::Text("x".into()), None, "text/plain", false)
        .await
        .unwrap();

    let err = engine.unlink(2, "usr", "", "f.txt").await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::NotAuthorized));
}
