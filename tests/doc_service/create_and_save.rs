use parchment::vfs::write::Content;
use sqlx::PgPool;

use crate::common::doc_service;

#[sqlx::test]
async fn create_file_defaults_to_markdown_extension_at_top_of_listing(pool: PgPool) {
    let (docs, _vfs) = doc_service(pool).await;

    let file = docs.create_file(1, "usr", "", "notes", "").await.unwrap();
    assert_eq!(file.filename, "notes.md");
    assert_eq!(file.ordinal, 0);
    assert_eq!(file.content_type.as_deref(), Some("text/markdown"));
}

#[sqlx::test]
async fn create_file_inserts_after_the_named_sibling(pool: PgPool) {
    let (docs, _vfs) = doc_service(pool).await;

    let first = docs.create_file(1, "usr", "", "a", "").await.unwrap();
    assert_eq!(first.ordinal, 0);

    let second = docs.create_file(1, "usr", "", "b", "a.md").await.unwrap();
    assert_eq!(second.ordinal, 1);
}

#[sqlx::test]
async fn create_folder_makes_a_directory(pool: PgPool) {
    let (docs, _vfs) = doc_service(pool).await;

    let folder = docs.create_folder(1, "usr", "", "docs", "").await.unwrap();
    assert!(folder.is_directory);
    assert_eq!(folder.filename, "docs");
}

#[sqlx::test]
async fn save_file_overwrites_content_and_preserves_ordinal(pool: PgPool) {
    let (docs, _vfs) = doc_service(pool).await;

    let created = docs.create_file(1, "usr", "", "notes", "").await.unwrap();
    let saved = docs
        .save_file(1, "usr", "", "notes.md", Content::Text("updated body".into()), None)
        .await
        .unwrap();

    assert_eq!(saved.ordinal, created.ordinal);
    assert_eq!(saved.content_text.as_deref(), Some("updated body"));
}

#[sqlx::test]
async fn save_file_renames_when_new_name_differs(pool: PgPool) {
    let (docs, _vfs) = doc_service(pool).await;

    docs.create_file(1, "usr", "", "draft", "").await.unwrap();
    let saved = docs
        .save_file(1, "usr", "", "draft.md", Content::Text("final".into()), Some("final"))
        .await
        .unwrap();

    assert_eq!(saved.filename, "final.md");
}

#[sqlx::test]
async fn save_file_rejects_rename_onto_an_existing_name(pool: PgPool) {
    let (docs, _vfs) = doc_service(pool).await;

    docs.create_file(1, "usr", "", "draft", "").await.unwrap();
    docs.create_file(1, "usr", "", "final", "").await.unwrap();

    let err = docs
        .save_file(1, "usr", "", "draft.md", Content::Text("x".into()), Some("final"))
        .await
        .unwrap_err();
    assert!(matches!(err, parchment::error::Error::Conflict(_)));
}
