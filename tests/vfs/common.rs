use std::sync::Arc;

use parchment::store::Store;
use parchment::vfs::VfsEngine;
use sqlx::PgPool;

/// Boot a fresh schema on the pool `#[sqlx::test]` hands us, and hand
/// back a ready-to-use engine.
pub async fn vfs(pool: PgPool) -> VfsEngine {
    let store = Arc::new(Store::from_pool(pool));
    store.bootstrap().await.expect("bootstrap schema");
    VfsEngine::new(store)
}
