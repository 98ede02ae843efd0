//! `write_text_file` / `write_binary_file` (§4.3.4).

use super::{Node, VfsEngine};
use crate::error::Result;

/// Content payload for a write, tagged by the column it is authoritative
/// for (I2).
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    fn is_binary(&self) -> bool {
        matches!(self, Content::Binary(_))
    }
}

impl VfsEngine {
    /// Write (create-or-overwrite) a file. `ensure_path(parent_path)` is
    /// called internally first (I4). If a row already exists at
    /// `(parent_path, name)` and `overwrite` is true, updates
    /// `content_*`/`size_bytes`/`content_type`/`modified_time` while
    /// preserving `ordinal`, `uuid`, `owner_id`, `is_public`. Otherwise
    /// inserts a new row with ordinal selection identical to `mkdir`.
    #[allow(clippy::too_many_arguments)]
    pub async fn write_file(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
        content: Content,
        ordinal: Option<i32>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<Node> {
        super::path::valid_name(name)?;
        self.ensure_path(owner, root_key, parent_path).await?;

        let is_binary = content.is_binary();
        let (text, binary) = split_content(content);
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        let content_type = content_type.to_string();

        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, Node>(
                        "SELECT * FROM fn_write_file($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                    )
                    .bind(owner)
                    .bind(root_key)
                    .bind(parent_path)
                    .bind(name)
                    .bind(text)
                    .bind(binary)
                    .bind(is_binary)
                    .bind(ordinal)
                    .bind(content_type)
                    .bind(overwrite)
                    .fetch_one(conn)
                    .await
                })
            })
            .await
    }
}

fn split_content(content: Content) -> (Option<String>, Option<Vec<u8>>) {
    match content {
        Content::Text(s) => (Some(s), None),
        Content::Binary(b) => (None, Some(b)),
    }
}
