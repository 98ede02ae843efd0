//! `paste_items` (§4.4).

use serde::Serialize;

use super::DocService;
use crate::error::Result;
use crate::tx_scope::run_trans;

/// Per-item outcome of [`DocService::paste_items`]: items whose
/// destination name already exists in `target_folder` are skipped
/// rather than aborting the whole paste.
#[derive(Debug, Clone, Serialize)]
pub struct PasteOutcome {
    pub source_path: String,
    pub moved: bool,
    pub diagnostic: Option<String>,
}

impl DocService {
    /// Move every path in `paste_items` into `target_folder`, preserving
    /// their relative order starting at `target_ordinal`. Collisions are
    /// skipped with a per-item diagnostic, not a whole-operation failure.
    pub async fn paste_items(
        &self,
        owner: i64,
        root_key: &str,
        target_folder: &str,
        paste_items: &[String],
        target_ordinal: i32,
    ) -> Result<Vec<PasteOutcome>> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let target_folder = crate::vfs::path::normalize(target_folder)?;
            self.vfs
                .shift_ordinals_down(root_key, &target_folder, target_ordinal, paste_items.len() as i32)
                .await?;

            let mut outcomes = Vec::with_capacity(paste_items.len());
            for (idx, source_path) in paste_items.iter().enumerate() {
                let normalized = crate::vfs::path::normalize(source_path)?;
                let (source_parent, source_name) = crate::vfs::path::split(&normalized)?;

                let outcome = self
                    .vfs
                    .rename(owner, root_key, &source_parent, &source_name, &target_folder, &source_name)
                    .await?;

                if outcome.success {
                    let ordinal = target_ordinal + idx as i32;
                    self.vfs
                        .set_ordinal(root_key, &target_folder, &source_name, ordinal)
                        .await?;
                }

                outcomes.push(PasteOutcome {
                    source_path: source_path.clone(),
                    moved: outcome.success,
                    diagnostic: outcome.diagnostic,
                });
            }

            Ok(outcomes)
        })
        .await
    }
}
