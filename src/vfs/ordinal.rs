//! Ordinal assignment and reordering (§4.3.12, I7).

use super::VfsEngine;
use crate::error::Result;

/// Direction passed to `move_up_down` (§4.4) / [`VfsEngine::swap_with_neighbor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl VfsEngine {
    /// `shift_ordinals_down(owner, parentPath, insertOrdinal, slots, rootKey)`:
    /// add `slots` to every child of `parentPath` whose `ordinal >=
    /// insertOrdinal`. Preserves relative order and never changes
    /// `filename` or `uuid` (P8).
    pub async fn shift_ordinals_down(
        &self,
        root_key: &str,
        parent_path: &str,
        insert_ordinal: i32,
        slots: i32,
    ) -> Result<()> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_shift_ordinals_down($1, $2, $3, $4)")
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(insert_ordinal)
                        .bind(slots)
                        .execute(conn)
                        .await
                })
            })
            .await?;
        Ok(())
    }

    /// Set the ordinal of `(parent_path, filename)` directly, without
    /// regard for collisions. Used by `paste_items` after the target
    /// range has already been cleared with [`Self::shift_ordinals_down`].
    pub async fn set_ordinal(&self, root_key: &str, parent_path: &str, filename: &str, ordinal: i32) -> Result<()> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let filename = filename.to_string();
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_set_ordinal($1, $2, $3, $4)")
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(filename)
                        .bind(ordinal)
                        .execute(conn)
                        .await
                })
            })
            .await?;
        Ok(())
    }

    /// Swap the ordinal of the node at `full_path` with its immediate
    /// neighbor in the requested direction. A no-op at either extreme.
    /// Backs `DocService::move_up_down` (§4.4).
    pub async fn swap_with_neighbor(
        &self,
        root_key: &str,
        parent_path: &str,
        filename: &str,
        direction: Direction,
    ) -> Result<()> {
        let root_key = root_key.to_string();
        let parent_path = parent_path.to_string();
        let filename = filename.to_string();
        let direction = match direction {
            Direction::Up => "up",
            Direction::Down => "down",
        };
        self.store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query("SELECT fn_swap_with_neighbor($1, $2, $3, $4)")
                        .bind(root_key)
                        .bind(parent_path)
                        .bind(filename)
                        .bind(direction)
                        .execute(conn)
                        .await
                })
            })
            .await?;
        Ok(())
    }
}
