//! Fixed-size worker pool for embarrassingly parallel per-image work.
//!
//! Jobs never share mutable state; results are collected by input position so
//! callers see the same order as the sequential path.

use crate::error::MosaicResult;
#[cfg(feature = "parallel-io")]
use crate::error::MosaicError;

#[cfg(feature = "parallel-io")]
use rayon::prelude::*;
use tracing::trace;

/// Number of worker threads requested by `n_jobs`.
///
/// `1` runs inline, `0` or negative values use every available core.
#[must_use]
pub fn resolve_worker_count(n_jobs: i32) -> usize {
    if n_jobs > 0 {
        return n_jobs as usize;
    }
    std::thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
}

/// Applies `job` to every item, in parallel when more than one worker is
/// requested and the `parallel-io` feature is enabled.
///
/// The first error (by input position) is returned.
pub fn map_indexed<I, T, F>(items: &[I], n_jobs: i32, job: F) -> MosaicResult<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(usize, &I) -> MosaicResult<T> + Send + Sync,
{
    let workers = resolve_worker_count(n_jobs).min(items.len().max(1));

    #[cfg(feature = "parallel-io")]
    {
        if workers > 1 {
            trace!(workers, items = items.len(), "dispatching to worker pool");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| MosaicError::ThreadPool(format!("pool creation failed: {e}")))?;

            let results: Vec<MosaicResult<T>> = pool.install(|| {
                items
                    .par_iter()
                    .enumerate()
                    .map(|(index, item)| job(index, item))
                    .collect()
            });
            return results.into_iter().collect();
        }
    }

    trace!(workers, items = items.len(), "running jobs inline");
    items
        .iter()
        .enumerate()
        .map(|(index, item)| job(index, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{map_indexed, resolve_worker_count};
    use crate::error::MosaicError;

    #[test]
    fn worker_count_defaults_to_all_cores() {
        assert_eq!(resolve_worker_count(3), 3);
        assert!(resolve_worker_count(-1) >= 1);
        assert!(resolve_worker_count(0) >= 1);
    }

    #[test]
    fn results_keep_input_order() {
        let items: Vec<u32> = (0..64).collect();
        let doubled = map_indexed(&items, 4, |_, value| Ok(value * 2)).expect("map");
        assert_eq!(doubled, items.iter().map(|v| v * 2).collect::<Vec<_>>());
    }

    #[test]
    fn first_failure_is_reported() {
        let items = [1, 2, 3];
        let result = map_indexed(&items, 2, |index, _| {
            if index >= 1 {
                Err(MosaicError::InvalidData(format!("job {index}")))
            } else {
                Ok(index)
            }
        });
        let err = result.expect_err("must fail");
        assert!(format!("{err}").contains("job 1"));
    }
}
