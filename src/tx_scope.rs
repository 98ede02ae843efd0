//! Ambient, nesting-safe transaction context (§4.2).
//!
//! `run_trans` enters a scope: if no scope exists in the current task, a
//! connection is acquired, `BEGIN` is issued, the closure runs, and the
//! transaction is committed on success or rolled back on failure. If a
//! scope already exists it is reused — single-transaction nesting, no
//! `SAVEPOINT` — matching the open question resolved in DESIGN.md.
//!
//! The ambient context is carried with [`tokio::task_local!`], the async
//! equivalent of continuation-local storage: it propagates across
//! `.await` points within the same task without being threaded through
//! every call explicitly.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::store::Store;

tokio::task_local! {
    static CURRENT_TX: Arc<TxState>;
}

/// Live transaction shared by every nested `run_trans` call in this task.
pub struct TxState {
    pub(crate) tx: Mutex<Transaction<'static, Postgres>>,
    depth: AtomicUsize,
}

/// Enter a transaction scope, reusing one already active in this task.
///
/// On the outermost call: `BEGIN`, run `f`, `COMMIT` on `Ok`, `ROLLBACK`
/// on `Err` (the original error is always re-raised). On a nested call:
/// just run `f` against the same transaction.
pub async fn run_trans<F, Fut, T>(store: &Store, f: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Ok(state) = CURRENT_TX.try_with(Arc::clone) {
        state.depth.fetch_add(1, Ordering::SeqCst);
        let result = f().await;
        state.depth.fetch_sub(1, Ordering::SeqCst);
        return result;
    }

    let tx = store.pool().begin().await?;
    let state = Arc::new(TxState { tx: Mutex::new(tx), depth: AtomicUsize::new(1) });

    let result = CURRENT_TX.scope(Arc::clone(&state), f()).await;

    let tx = match Arc::try_unwrap(state) {
        Ok(state) => state.tx.into_inner(),
        Err(_) => {
            // A nested call leaked a clone of the Arc across the scope
            // boundary; this is a programming error, not a data-loss risk,
            // since the pooled connection is still owned by the Arc.
            tracing::error!("tx scope exited with outstanding references");
            return result;
        }
    };

    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// The active transaction for this task, if any.
pub(crate) fn current() -> Option<Arc<TxState>> {
    CURRENT_TX.try_with(Arc::clone).ok()
}
