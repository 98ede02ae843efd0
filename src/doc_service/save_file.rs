//! `save_file` (§4.4).

use super::{default_extension, DocService};
use crate::error::{Error, Result};
use crate::tx_scope::run_trans;
use crate::vfs::write::Content;
use crate::vfs::Node;

impl DocService {
    /// Save `content` into `filename` under `folder`, optionally renaming
    /// to `new_file_name` first. Overwrites in place, preserving ordinal.
    pub async fn save_file(
        &self,
        owner: i64,
        root_key: &str,
        folder: &str,
        filename: &str,
        content: Content,
        new_file_name: Option<&str>,
    ) -> Result<Node> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let folder = crate::vfs::path::normalize(folder)?;

            let folder_node = self.vfs.stat_path(root_key, &folder).await?;
            if !folder.is_empty() {
                match folder_node {
                    None => return Err(Error::NotFound(folder.clone())),
                    Some(ref node) if !node.is_directory => {
                        return Err(Error::NotADirectory(folder.clone()));
                    }
                    Some(_) => {}
                }
            }

            let mut effective_name = filename.to_string();
            if let Some(new_name) = new_file_name {
                if new_name != filename {
                    let new_name = default_extension(new_name, "md");
                    if self.vfs.exists(root_key, &folder, &new_name).await? {
                        return Err(Error::Conflict(new_name));
                    }
                    let outcome = self.vfs.rename(owner, root_key, &folder, filename, &folder, &new_name).await?;
                    if !outcome.success {
                        return Err(Error::Conflict(outcome.diagnostic.unwrap_or_default()));
                    }
                    effective_name = new_name;
                }
            }

            self.vfs
                .write_file(owner, root_key, &folder, &effective_name, content, None, "text/markdown", true)
                .await
        })
        .await
    }
}
