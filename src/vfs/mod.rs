//! Virtual File System engine: a single-table hierarchical file system
//! with path-based addressing, ordinal ordering, recursive descendant
//! queries, hybrid text/binary content, and authorization.
//!
//! Every primitive is a PL/pgSQL stored procedure (`fn_mkdir`, `fn_rename`,
//! ...) declared in [`crate::store::schema`]; each Rust method here is a
//! thin `SELECT * FROM fn_name(...)` call issued through
//! [`crate::store::Store`], which resolves to the ambient
//! [`crate::tx_scope`] transaction when one is active. Expected failures
//! (not found, already exists, not authorized, ...) come back as a
//! dedicated SQLSTATE per kind, decoded once in [`crate::error`] rather
//! than parsed from message text at each call site.
//!
//! [`Store::with_conn`]: crate::store::Store::with_conn

pub mod auth;
pub mod descendants;
pub mod ensure_path;
pub mod mkdir;
pub mod ordinal;
pub mod path;
pub mod read;
pub mod read_dir;
pub mod remove;
pub mod rename;
pub mod search;
pub mod stat;
pub mod write;

use std::sync::Arc;

use uuid::Uuid;

use crate::store::Store;

/// Maximum length of a path name accepted by the engine.
pub const MAX_PATH_LEN: usize = 1024;

/// A single row of the `nodes` table (§3.1).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Node {
    pub id: i64,
    pub uuid: Uuid,
    pub owner_id: i64,
    pub root_key: String,
    pub parent_path: String,
    pub filename: String,
    pub ordinal: i32,
    pub is_directory: bool,
    pub is_public: bool,
    pub is_binary: bool,
    pub content_text: Option<String>,
    pub content_binary: Option<Vec<u8>>,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub created_time: i64,
    pub modified_time: i64,
}

impl Node {
    /// The logical full path of this node (`parent_path + "/" + filename`,
    /// or `"/" + filename` when `parent_path` is empty, per I3).
    pub fn full_path(&self) -> String {
        if self.parent_path.is_empty() {
            self.filename.clone()
        } else {
            format!("{}/{}", self.parent_path, self.filename)
        }
    }

    /// The authoritative content column, encoded as bytes (I2).
    pub fn content_bytes(&self) -> Option<Vec<u8>> {
        if self.is_binary {
            self.content_binary.clone()
        } else {
            self.content_text.clone().map(String::into_bytes)
        }
    }
}

/// The VFS engine: all file/directory primitives operating on one
/// `nodes` table, scoped by `root_key`.
pub struct VfsEngine {
    pub(crate) store: Arc<Store>,
}

impl VfsEngine {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}
