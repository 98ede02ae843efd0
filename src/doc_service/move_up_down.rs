//! `move_up_down` (§4.4).

use super::DocService;
use crate::error::Result;
use crate::tx_scope::run_trans;
use crate::vfs::ordinal::Direction;

impl DocService {
    /// Swap `filename`'s ordinal with its immediate neighbor in
    /// `direction`. No-op if already at the extreme.
    pub async fn move_up_down(
        &self,
        root_key: &str,
        folder: &str,
        filename: &str,
        direction: Direction,
    ) -> Result<()> {
        let store = self.store.clone();
        run_trans(&store, || async {
            let folder = crate::vfs::path::normalize(folder)?;
            self.vfs.swap_with_neighbor(root_key, &folder, filename, direction).await
        })
        .await
    }
}
