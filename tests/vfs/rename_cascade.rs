use parchment::vfs::write::Content;
use sqlx::PgPool;

use crate::common::vfs;

#[sqlx::test]
async fn rename_reports_not_found_for_missing_source(pool: PgPool) {
    let engine = vfs(pool).await;

    let outcome = engine.rename(1, "usr", "", "missing", "", "renamed").await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.diagnostic.as_deref(), Some("not found"));
}

#[sqlx::test]
async fn rename_reports_already_exists_for_occupied_destination(pool: PgPool) {
    let engine = vfs(pool).await;

    engine.mkdir(1, "usr", "", "a", None, false).await.unwrap();
    engine.mkdir(1, "usr", "", "b", None, false).await.unwrap();

    let outcome = engine.rename(1, "usr", "", "a", "", "b").await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.diagnostic.as_deref(), Some("already exists"));
}

#[sqlx::test]
async fn rename_cascades_to_descendants(pool: PgPool) {
    let engine = vfs(pool).await;

    engine.mkdir(1, "usr", "", "d", None, false).await.unwrap();
    engine
        .write_file(1, "usr", "d", "f.txt", Content::Text("x".into()), None, "text/plain", false)
        .await
        .unwrap();
    engine.mkdir(1, "usr", "d", "sub", None, false).await.unwrap();
    engine
        .write_file(1, "usr", "d/sub", "g.txt", Content::Text("y".into()), None, "text/plain", false)
        .await
        .unwrap();

    let outcome = engine.rename(1, "usr", "", "d", "", "e").await.unwrap();
    assert!(outcome.success);

    assert!(!engine.exists("usr", "", "d").await.unwrap());
    assert!(engine.exists("usr", "", "e").await.unwrap());
    assert!(engine.exists("usr", "e", "f.txt").await.unwrap());
    assert!(engine.exists("usr", "e", "sub").await.unwrap());
    assert!(engine.exists("usr", "e/sub", "g.txt").await.unwrap());
}
