//! `rename_folder` / `delete_file_or_folder` / `set_public` (§4.4): thin
//! wrappers over VFS primitives with path normalization and admin checks.

use super::DocService;
use crate::error::Result;
use crate::tx_scope::run_trans;
use crate::vfs::rename::RenameOutcome;

impl DocService {
    /// Rename a folder (or file) in place, without changing its parent.
    pub async fn rename_folder(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameOutcome> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let parent_path = crate::vfs::path::normalize(parent_path)?;
            self.vfs.rename(owner, root_key, &parent_path, old_name, &parent_path, new_name).await
        })
        .await
    }

    /// Polymorphic delete of `path`, dispatching to `unlink`/`rmdir` via
    /// [`crate::vfs::VfsEngine::rm`].
    pub async fn delete_file_or_folder(
        &self,
        owner: i64,
        root_key: &str,
        path: &str,
        recursive: bool,
    ) -> Result<()> {
        let store = self.store.clone();
        run_trans(&store, || async { self.vfs.rm(owner, root_key, path, recursive, false).await }).await
    }

    /// Set the `is_public` flag of `(parent_path, name)`. Restricted to
    /// the owner or admin (`owner == 0`), enforced by the underlying
    /// `UPDATE ... WHERE owner_id = $owner OR $owner = 0` clause.
    pub async fn set_public(
        &self,
        owner: i64,
        root_key: &str,
        parent_path: &str,
        name: &str,
        is_public: bool,
    ) -> Result<()> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let parent_path = crate::vfs::path::normalize(parent_path)?;
            self.vfs.set_public(owner, root_key, &parent_path, name, is_public).await
        })
        .await
    }
}
