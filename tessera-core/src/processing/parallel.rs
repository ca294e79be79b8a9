//! Order-preserving map over independent chunks

use crate::error::Result;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Apply `f` to every item, on `workers` threads when more than one
///
/// Results keep the input order. If several items fail, the error of the
/// earliest one is returned.
pub fn map_ordered<T, R, F>(items: Vec<T>, workers: usize, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Sync + Send,
{
    if workers <= 1 || items.len() <= 1 {
        debug!("Processing {} chunks sequentially", items.len());
        return items.into_iter().map(f).collect();
    }
    map_parallel(items, workers, f)
}

#[cfg(feature = "parallel")]
fn map_parallel<T, R, F>(items: Vec<T>, workers: usize, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Sync + Send,
{
    let threads = workers.min(num_cpus::get()).max(1);
    debug!(
        "Processing {} chunks on {} worker threads",
        items.len(),
        threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("tessera-worker-{i}"))
        .build()
        .map_err(|e| crate::error::Error::Parallel {
            source: Box::new(e),
        })?;

    let results: Vec<Result<R>> = pool.install(|| items.into_par_iter().map(&f).collect());
    results.into_iter().collect()
}

#[cfg(not(feature = "parallel"))]
fn map_parallel<T, R, F>(items: Vec<T>, _workers: usize, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Sync + Send,
{
    // Fallback to sequential if parallel feature is disabled
    debug!(
        "Parallel feature disabled, processing {} chunks sequentially",
        items.len()
    );
    items.into_iter().map(f).collect()
}
