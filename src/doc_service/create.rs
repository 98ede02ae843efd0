//! `create_file` / `create_folder` (§4.4).

use super::{default_extension, DocService};
use crate::error::Result;
use crate::tx_scope::run_trans;
use crate::vfs::Node;

impl DocService {
    /// Create a new markdown file in `folder`, positioned immediately
    /// after `insert_after` (top of the listing if empty).
    pub async fn create_file(
        &self,
        owner: i64,
        root_key: &str,
        folder: &str,
        name: &str,
        insert_after: &str,
    ) -> Result<Node> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let folder = crate::vfs::path::normalize(folder)?;
            let target_ordinal = self.target_ordinal(root_key, &folder, insert_after).await?;
            self.vfs.shift_ordinals_down(root_key, &folder, target_ordinal, 1).await?;

            let name = default_extension(name, "md");
            self.vfs
                .write_file(
                    owner,
                    root_key,
                    &folder,
                    &name,
                    crate::vfs::write::Content::Text(String::new()),
                    Some(target_ordinal),
                    "text/markdown",
                    false,
                )
                .await
        })
        .await
    }

    /// Create a new directory in `folder`, positioned like [`Self::create_file`].
    pub async fn create_folder(
        &self,
        owner: i64,
        root_key: &str,
        folder: &str,
        name: &str,
        insert_after: &str,
    ) -> Result<Node> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let folder = crate::vfs::path::normalize(folder)?;
            let target_ordinal = self.target_ordinal(root_key, &folder, insert_after).await?;
            self.vfs.shift_ordinals_down(root_key, &folder, target_ordinal, 1).await?;

            self.vfs.mkdir(owner, root_key, &folder, name, Some(target_ordinal), false).await
        })
        .await
    }

    async fn target_ordinal(&self, root_key: &str, folder: &str, insert_after: &str) -> Result<i32> {
        if insert_after.is_empty() {
            return Ok(0);
        }

        match self.vfs.stat(root_key, folder, insert_after).await? {
            Some(node) => Ok(node.ordinal + 1),
            None => Ok(0),
        }
    }
}
