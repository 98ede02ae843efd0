use sqlx::PgPool;

use crate::common::doc_service;

#[sqlx::test]
async fn rename_folder_renames_in_place(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_folder(1, "usr", "", "old-name", "").await.unwrap();
    let outcome = docs.rename_folder(1, "usr", "", "old-name", "new-name").await.unwrap();
    assert!(outcome.success);
    assert!(vfs.exists("usr", "", "new-name").await.unwrap());
}

#[sqlx::test]
async fn delete_file_or_folder_removes_a_file(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_file(1, "usr", "", "throwaway", "").await.unwrap();
    docs.delete_file_or_folder(1, "usr", "throwaway.md", false).await.unwrap();
    assert!(!vfs.exists("usr", "", "throwaway.md").await.unwrap());
}

#[sqlx::test]
async fn delete_file_or_folder_requires_recursive_for_non_empty_directories(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_folder(1, "usr", "", "project", "").await.unwrap();
    docs.create_file(1, "usr", "project", "readme", "").await.unwrap();

    let err = docs.delete_file_or_folder(1, "usr", "project", false).await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::NotEmpty(_)));

    docs.delete_file_or_folder(1, "usr", "project", true).await.unwrap();
    assert!(!vfs.exists("usr", "", "project").await.unwrap());
}

#[sqlx::test]
async fn set_public_is_restricted_to_owner_or_admin(pool: PgPool) {
    let (docs, vfs) = doc_service(pool).await;

    docs.create_file(1, "usr", "", "shared", "").await.unwrap();

    let err = docs.set_public(2, "usr", "", "shared.md", true).await.unwrap_err();
    assert!(matches!(err, parchment::error::Error::NotAuthorized));

    docs.set_public(1, "usr", "", "shared.md", true).await.unwrap();
    assert!(vfs.read_file(2, "usr", "", "shared.md").await.is_ok());
}
