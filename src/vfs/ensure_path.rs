//! `ensure_path` (§4.3.2, I4, P5): idempotently create every missing
//! directory along a path.

use super::VfsEngine;
use crate::error::Result;

impl VfsEngine {
    /// Idempotently create every missing directory along `full_path`.
    /// Empty string and `/` return success without change. When a new
    /// directory is inserted, its ordinal is `max(siblings)+1` (or `0` in
    /// an empty directory).
    pub async fn ensure_path(&self, owner: i64, root_key: &str, full_path: &str) -> Result<()> {
        let normalized = super::path::normalize(full_path)?;
        if normalized.is_empty() {
            return Ok(());
        }
        super::path::valid_path_components(&normalized)?;

        let root_key = root_key.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_ensure_path($1, $2, $3)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(normalized)
                        .execute(conn)
                        .await
                })
            })
            .await?;
        Ok(())
    }
}
