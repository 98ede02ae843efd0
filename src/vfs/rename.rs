//! `rename` (§4.3.8, P4): atomic move-and-rename with cascading path
//! rewrite of descendants.

use super::VfsEngine;
use crate::error::Result;

/// Outcome of [`VfsEngine::rename`]. Not-found and already-exists are
/// expected, non-exceptional failures (§9 "exception-for-control-flow");
/// an authorization failure is a genuine error and surfaces as `Err`
/// instead, consistent with every other primitive's owner check.
pub struct RenameOutcome {
    pub success: bool,
    pub diagnostic: Option<String>,
}

impl RenameOutcome {
    fn ok() -> Self {
        Self { success: true, diagnostic: None }
    }

    fn fail(diagnostic: impl Into<String>) -> Self {
        Self { success: false, diagnostic: Some(diagnostic.into()) }
    }
}

impl VfsEngine {
    /// Atomic move and rename of `(old_parent, old_name)` to
    /// `(new_parent, new_name)`. If the source is a directory, every
    /// descendant's `parent_path` is rewritten in the same statement so
    /// observers never see a mixed old/new state (P4, §5 ordering
    /// guarantees).
    pub async fn rename(
        &self,
        owner: i64,
        root_key: &str,
        old_parent: &str,
        old_name: &str,
        new_parent: &str,
        new_name: &str,
    ) -> Result<RenameOutcome> {
        let root_key = root_key.to_string();
        let old_parent = old_parent.to_string();
        let old_name = old_name.to_string();
        let new_parent = new_parent.to_string();
        let new_name = new_name.to_string();

        // Not-found/already-exists come back as ordinary result rows;
        // not-authorized is raised as a genuine SQL exception (VFS03) and
        // surfaces here as `Err` before the match below ever runs.
        let (success, diagnostic): (bool, Option<String>) = self
            .store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, (bool, Option<String>)>("SELECT * FROM fn_rename($1, $2, $3, $4, $5, $6)")
                        .bind(owner)
                        .bind(root_key)
                        .bind(old_parent)
                        .bind(old_name)
                        .bind(new_parent)
                        .bind(new_name)
                        .fetch_one(conn)
                        .await
                })
            })
            .await?;

        Ok(if success {
            RenameOutcome::ok()
        } else {
            RenameOutcome::fail(diagnostic.unwrap_or_default())
        })
    }
}
