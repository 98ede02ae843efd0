//! `read_file` (§4.3.5).

use super::VfsEngine;
use crate::error::Result;

impl VfsEngine {
    /// Return the authoritative content column encoded as bytes (text is
    /// UTF-8 encoded). Fails with [`crate::error::Error::NotFound`] if
    /// missing, [`crate::error::Error::NotAuthorized`] if
    /// `owner != row.owner_id && owner != 0 && !row.is_public`.
    pub async fn read_file(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
    ) -> Result<Vec<u8>> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        let bytes: Vec<u8> = self
            .store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_scalar("SELECT fn_read_file($1, $2, $3, $4)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .fetch_one(conn)
                        .await
                })
            })
            .await?;

        Ok(bytes)
    }
}
