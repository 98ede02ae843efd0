//! `join_files` (§4.4).

use super::DocService;
use crate::error::{Error, Result};
use crate::tx_scope::run_trans;
use crate::vfs::write::Content;
use crate::vfs::Node;

impl DocService {
    /// Concatenate the text contents of `filenames`, in order, into a new
    /// file named `filenames[0]`; delete the originals on success.
    /// Atomic under one transaction.
    pub async fn join_files(&self, owner: i64, root_key: &str, folder: &str, filenames: &[String]) -> Result<Node> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let folder = crate::vfs::path::normalize(folder)?;
            let Some((first, rest)) = filenames.split_first() else {
                return Err(Error::InvalidName("no files to join".to_string()));
            };

            let mut joined = String::new();
            for (idx, name) in filenames.iter().enumerate() {
                let bytes = self.vfs.read_file(owner, root_key, &folder, name).await?;
                let text = String::from_utf8(bytes).map_err(|e| Error::InvalidName(e.to_string()))?;
                if idx > 0 {
                    joined.push('\n');
                }
                joined.push_str(&text);
            }

            let result = self
                .vfs
                .write_file(owner, root_key, &folder, first, Content::Text(joined), None, "text/markdown", true)
                .await?;

            for name in rest {
                self.vfs.unlink(owner, root_key, &folder, name).await?;
            }

            Ok(result)
        })
        .await
    }
}
