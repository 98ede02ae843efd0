//! `exists` / `stat` (§4.3.6): pure lookups, no authorization.

use super::{Node, VfsEngine};
use crate::error::Result;

impl VfsEngine {
    /// `stat(parentPath, name, rootKey) -> row|null`.
    pub async fn stat(&self, root_key: &str, parent_path: &str, name: &str) -> Result<Option<Node>> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, Node>("SELECT * FROM fn_stat($1, $2, $3)")
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .fetch_optional(conn)
                        .await
                })
            })
            .await
    }

    /// `exists(parentPath, name, rootKey) -> bool`.
    pub async fn exists(&self, root_key: &str, parent_path: &str, name: &str) -> Result<bool> {
        Ok(self.stat(root_key, parent_path, name).await?.is_some())
    }

    /// `stat` by full path, splitting it into `(parent_path, name)` first.
    /// The logical root (`""` or `/`) has no backing row and always stats
    /// as `None`.
    pub async fn stat_path(&self, root_key: &str, full_path: &str) -> Result<Option<Node>> {
        let normalized = super::path::normalize(full_path)?;
        if normalized.is_empty() {
            return Ok(None);
        }
        let (parent, name) = super::path::split(&normalized)?;
        self.stat(root_key, &parent, &name).await
    }
}
