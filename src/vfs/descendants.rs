//! `get_descendants` (§4.3.13).

use super::{Node, VfsEngine};
use crate::error::Result;

impl VfsEngine {
    /// The node identified by `node_uuid` plus every descendant of
    /// `root_path`, flattened. Matches rows where `uuid = node_uuid OR
    /// parent_path = root_path OR parent_path LIKE root_path || '/%'`.
    pub async fn get_descendants(
        &self,
        root_key: &str,
        node_uuid: uuid::Uuid,
        root_path: &str,
    ) -> Result<Vec<Node>> {
        let root_key = root_key.to_string();
        let root_path = root_path.to_string();

        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, Node>("SELECT * FROM fn_get_descendants($1, $2, $3)")
                        .bind(root_key)
                        .bind(node_uuid)
                        .bind(root_path)
                        .fetch_all(conn)
                        .await
                })
            })
            .await
    }
}
