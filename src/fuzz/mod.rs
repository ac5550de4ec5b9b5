//! Fuzzing engine: path partitioning and the worker pool.
//!
//! The path list is split into contiguous per-worker slices before any task
//! spawns; after that, workers share only the read-only target, so the
//! fuzzing phase itself needs no synchronization. Each worker runs to its
//! own completion or first error. The engine joins them all and fails the
//! run if any worker failed, without cancelling the others.

mod worker;

use std::ops::Range;
use std::sync::Arc;

use anyhow::{Result, bail, ensure};
use tracing::{error, info};

use crate::target::Target;

/// Splits `total` paths into `workers` contiguous index ranges.
///
/// Every worker gets `total / workers` paths except the last, which absorbs
/// the remainder. The ranges are disjoint, cover every index exactly once,
/// and concatenate in worker order back to the original list.
///
/// `workers` must be at least 1.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    let per_worker = total / workers;
    (0..workers)
        .map(|index| {
            let start = index * per_worker;
            let end = if index + 1 == workers {
                total
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}

/// Fuzzes every path against the target with `workers` parallel workers.
///
/// Spawns one task per worker over a static partition of `paths`, waits for
/// all of them, and reports failure if any worker failed.
pub async fn run(target: Target, paths: Vec<String>, workers: usize) -> Result<()> {
    ensure!(workers >= 1, "worker count must be at least 1");

    info!("fuzzing {} paths with {} workers", paths.len(), workers);

    let target = Arc::new(target);
    let paths = Arc::new(paths);
    let ranges = partition(paths.len(), workers);

    let mut handles = Vec::with_capacity(workers);
    for (index, range) in ranges.into_iter().enumerate() {
        let target = Arc::clone(&target);
        let paths = Arc::clone(&paths);
        handles.push(tokio::spawn(async move {
            worker::run(index, &target, &paths[range]).await
        }));
    }

    let mut failed = false;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                error!("worker {} failed: {:#}", index, err);
                failed = true;
            }
            Err(err) => {
                error!("worker {} panicked: {}", index, err);
                failed = true;
            }
        }
    }

    if failed {
        bail!("one or more workers failed");
    }
    Ok(())
}
