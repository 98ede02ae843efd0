//! `mkdir` (§4.3.3): create one directory row.

use super::{Node, VfsEngine};
use crate::error::Result;

impl VfsEngine {
    /// Create one directory row. If `ordinal` is `None`, auto-select as
    /// `max+1` (or `0` if empty). Fails with [`crate::error::Error::AlreadyExists`]
    /// if `(root_key, parent_path, name)` already exists,
    /// [`crate::error::Error::InvalidName`] if `name` violates
    /// [`super::path::valid_name`].
    pub async fn mkdir(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
        ordinal: Option<i32>,
        is_public: bool,
    ) -> Result<Node> {
        super::path::valid_name(name)?;

        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();

        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, Node>("SELECT * FROM fn_mkdir($1, $2, $3, $4, $5, $6)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(name)
                        .bind(ordinal)
                        .bind(is_public)
                        .fetch_one(conn)
                        .await
                })
            })
            .await
    }
}
