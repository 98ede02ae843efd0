//! `readdir` (§4.3.7, P7).

use super::{Node, VfsEngine};
use crate::error::Result;

impl VfsEngine {
    /// All children of `parent_path`, ordered `(ordinal ASC, filename ASC)`.
    pub async fn readdir(&self, root_key: &str, parent_path: &str) -> Result<Vec<Node>> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, Node>("SELECT * FROM fn_readdir($1, $2)")
                        .bind(root_key)
                        .bind(parent_path)
                        .fetch_all(conn)
                        .await
                })
            })
            .await
    }
}

