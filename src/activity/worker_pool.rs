//! Bounded worker pool shared by the listing and statistics phases.
//!
//! Work items flow to the workers through one queue and results flow back
//! through another. Both queues are sized to the exact number of items, so
//! the producer never blocks and every worker's result has a slot.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::error;

/// Runs `handler` over every item on at most `width` concurrent workers.
///
/// Returns one result per item in completion order. The call returns once
/// every worker has exited. A handler that panics loses its own result;
/// the loss is logged and the surviving workers drain the rest of the queue.
pub(crate) async fn run_pool<T, R, F, Fut>(width: usize, items: Vec<T>, handler: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let expected = items.len();
    if expected == 0 {
        return Vec::new();
    }

    let (work_tx, work_rx) = mpsc::channel::<T>(expected);
    let (result_tx, mut result_rx) = mpsc::channel::<R>(expected);
    let work_rx = Arc::new(Mutex::new(work_rx));
    let handler = Arc::new(handler);
    let mut workers = JoinSet::new();

    for _ in 0..width.clamp(1, expected) {
        let queue = Arc::clone(&work_rx);
        let results = result_tx.clone();
        let work = Arc::clone(&handler);
        workers.spawn(async move {
            loop {
                // The lock is only held while waiting for the next item.
                let next = queue.lock().await.recv().await;
                let Some(item) = next else {
                    break;
                };
                if results.send(work(item).await).await.is_err() {
                    break;
                }
            }
        });
    }
    drop(result_tx);

    for item in items {
        if work_tx.send(item).await.is_err() {
            break;
        }
    }
    drop(work_tx);

    let mut collected = Vec::with_capacity(expected);
    while let Some(result) = result_rx.recv().await {
        collected.push(result);
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(failure) = joined {
            error!("worker stopped before finishing its item: {failure}");
        }
    }
    if collected.len() < expected {
        error!(
            expected,
            collected = collected.len(),
            "worker pool lost results"
        );
    }
    collected
}
