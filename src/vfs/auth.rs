//! `check_auth` (§4.3.14, P6).

use super::VfsEngine;
use crate::error::Result;

impl VfsEngine {
    /// True iff the row at `(parent_path, name)` exists and `owner` is
    /// the owner, is admin (`owner == 0`), or `public_ok` and the row is
    /// public. The primitive never examines `is_public` unless
    /// `public_ok` is passed explicitly.
    pub async fn check_auth(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
        public_ok: bool,
    ) -> Result<bool> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_scalar("SELECT fn_check_auth($1, $2, $3, $4, $5)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .bind(public_ok)
                        .fetch_one(conn)
                        .await
                })
            })
            .await
    }

    /// Set the `is_public` flag of `(parent_path, name)`. Restricted to
    /// the owner or admin; fails [`crate::error::Error::NotFound`] if
    /// missing, [`crate::error::Error::NotAuthorized`] otherwise.
    pub async fn set_public(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
        is_public: bool,
    ) -> Result<()> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_set_public($1, $2, $3, $4, $5)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .bind(is_public)
                        .execute(conn)
                        .await
                })
            })
            .await?;

        Ok(())
    }
}
