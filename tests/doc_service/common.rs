use std::sync::Arc;

use parchment::doc_service::DocService;
use parchment::store::Store;
use parchment::vfs::VfsEngine;
use sqlx::PgPool;

/// Boot a fresh schema on the pool `#[sqlx::test]` hands us, and hand
/// back a ready-to-use service plus a standalone [`VfsEngine`] over the
/// same pool for asserting on state the service doesn't return directly.
pub async fn doc_service(pool: PgPool) -> (DocService, VfsEngine) {
    let store = Arc::new(Store::from_pool(pool));
    store.bootstrap().await.expect("bootstrap schema");
    (DocService::new(store.clone()), VfsEngine::new(store))
}
