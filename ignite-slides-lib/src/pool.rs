//! Bounded fan-out for concurrent downloads.
//!
//! Spawns a fixed number of tokio worker tasks that pull work items from a
//! bounded async-channel and post results to an unbounded mpsc channel for
//! a single consumer. The async-channel `Receiver` is `Clone`, so every
//! worker gets its own handle and no mutex sits in the hot path. The
//! bounded work channel provides backpressure: at most `n` items are in
//! flight at once and dispatch follows submission order. Completion is
//! signalled by channel closure rather than polling.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

/// Spawn `n` workers over `items` and return the results channel.
///
/// Items are submitted from a background task, so the caller can start
/// draining results immediately. The results channel closes once every
/// item has been processed and all workers have exited, so a plain
/// `while let Some(..) = rx.recv().await` loop consumes the whole batch.
/// Results arrive in completion order, not submission order.
pub fn dispatch<W, R, F, Fut>(n: usize, items: Vec<W>, process: F) -> mpsc::UnboundedReceiver<R>
where
    W: Send + 'static,
    R: Send + 'static,
    F: Fn(W) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let workers = n.max(1);
    let (work_tx, work_rx) = async_channel::bounded::<W>(workers);
    let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
    let process = Arc::new(process);

    for _ in 0..workers {
        let work_rx = work_rx.clone();
        let result_tx = result_tx.clone();
        let process = process.clone();
        tokio::spawn(async move {
            while let Ok(item) = work_rx.recv().await {
                if result_tx.send(process(item).await).is_err() {
                    break; // receiver dropped, stop early
                }
            }
        });
    }

    // Drop our copy so the results channel closes when all workers finish.
    drop(result_tx);

    tokio::spawn(async move {
        for item in items {
            if work_tx.send(item).await.is_err() {
                break;
            }
        }
        // work_tx drops here; workers drain the remaining items and exit.
    });

    result_rx
}
