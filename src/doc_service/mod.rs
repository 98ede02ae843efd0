//! DocService (§4.4): composite operations over [`crate::vfs::VfsEngine`].
//!
//! Every handler opens a single outer [`crate::tx_scope::run_trans`] and
//! calls VFS primitives inside it; nested primitive calls share that one
//! transaction (§5). DocService must never be imported by `crate::vfs` —
//! that would create a cycle.

pub mod create;
pub mod delete_rename;
pub mod join_files;
pub mod move_up_down;
pub mod paste_items;
pub mod save_file;

use std::sync::Arc;

use crate::store::Store;
use crate::vfs::VfsEngine;

/// Orchestration layer wrapping one [`VfsEngine`] and its backing
/// [`Store`] (needed directly to open [`crate::tx_scope`] scopes).
pub struct DocService {
    pub(crate) store: Arc<Store>,
    pub(crate) vfs: VfsEngine,
}

impl DocService {
    pub fn new(store: Arc<Store>) -> Self {
        let vfs = VfsEngine::new(Arc::clone(&store));
        Self { store, vfs }
    }
}

fn default_extension(name: &str, default_ext: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{name}.{default_ext}")
    }
}
