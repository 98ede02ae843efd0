//! `unlink` / `rmdir` / `rm` (§4.3.9–4.3.11).

use super::VfsEngine;
use crate::error::{Error, Result};

impl VfsEngine {
    /// Delete a file row. Fails [`Error::NotFound`] if missing,
    /// [`Error::IsADirectory`] if the row is a directory.
    pub async fn unlink(&self, owner: i64, root_key: &str, parent_path: &str, name: &str) -> Result<()> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_unlink($1, $2, $3, $4)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .execute(conn)
                        .await
                })
            })
            .await?;

        Ok(())
    }

    /// Delete a directory. Non-recursive fails [`Error::NotEmpty`] if any
    /// descendants exist. Recursive deletes the directory and every row
    /// whose `parent_path` equals or is nested under its full path.
    /// `force` suppresses [`Error::NotFound`].
    pub async fn rmdir(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
        recursive: bool,
        force: bool,
    ) -> Result<()> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_rmdir($1, $2, $3, $4, $5, $6)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .bind(recursive)
                        .bind(force)
                        .execute(conn)
                        .await
                })
            })
            .await?;

        Ok(())
    }

    /// Polymorphic delete: dispatches to [`fn_rmdir`] or [`fn_unlink`]
    /// inside the database after a `stat`. Refuses to delete the logical
    /// root with [`Error::CannotDeleteRoot`].
    ///
    /// [`fn_rmdir`]: crate::store::schema
    /// [`fn_unlink`]: crate::store::schema
    pub async fn rm(
        &self,
        owner: i64,
        root_key: &str,
        path: &str,
        recursive: bool,
        force: bool,
    ) -> Result<()> {
        let normalized = super::path::normalize(path)?;
        if normalized.is_empty() {
            return Err(Error::CannotDeleteRoot);
        }

        let (parent_path, name) = super::path::split(&normalized)?;
        let root_key = root_key.to_string();

        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_rm($1, $2, $3, $4, $5, $6)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .bind(recursive)
                        .bind(force)
                        .execute(conn)
                        .await
                })
            })
            .await?;

        Ok(())
    }
}
