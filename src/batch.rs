//! Converting many independent buffers at once.
//!
//! With `jobs == 1` inputs are converted in order on the calling thread.
//! Otherwise a dedicated rayon pool is built for the call, every worker takes
//! a contiguous range of inputs, and results travel back over a channel tagged
//! with their index. Each input succeeds or fails on its own.

use crate::error::{Error, Result};
use crate::tables::Utf32;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("jobs must be > 0")]
    NoJobs,
    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Per-input results, in input order.
pub type BatchResult<T> = std::result::Result<Vec<Result<T>>, BatchError>;

/// The first failing input of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("item {index}: {source}")]
pub struct ItemError {
    pub index: usize,
    pub source: Error,
}

/// Collapses per-input results into all outputs, or the first failure.
pub fn first_failure<T>(results: Vec<Result<T>>) -> std::result::Result<Vec<T>, ItemError> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| result.map_err(|source| ItemError { index, source }))
        .collect()
}

/// Encodes every input; see [`crate::encode`].
pub fn encode_many<S>(inputs: &[S], jobs: usize) -> BatchResult<Vec<u8>>
where
    S: AsRef<[Utf32]> + Sync,
{
    map_inputs(inputs, jobs, |input| crate::encode(input.as_ref()))
}

/// Decodes every input; see [`crate::decode`].
pub fn decode_many<S>(inputs: &[S], jobs: usize) -> BatchResult<Vec<Utf32>>
where
    S: AsRef<[u8]> + Sync,
{
    map_inputs(inputs, jobs, |input| crate::decode(input.as_ref()))
}

fn map_inputs<I, T, F>(inputs: &[I], jobs: usize, func: F) -> BatchResult<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T> + Sync,
{
    if jobs == 0 {
        return Err(BatchError::NoJobs);
    }
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    if jobs == 1 {
        Ok(map_sequential(inputs, func))
    } else {
        map_parallel(inputs, jobs, func)
    }
}

fn map_sequential<I, T, F>(inputs: &[I], func: F) -> Vec<Result<T>>
where
    F: Fn(&I) -> Result<T>,
{
    debug_println!("sequential processing, {} inputs", inputs.len());
    inputs.iter().map(func).collect()
}

fn make_range(len: usize, jobs: usize, i: usize) -> (usize, usize) {
    debug_assert!(jobs > 0, "jobs must be > 0");
    debug_assert!(i < jobs, "thread index {} is out of range (jobs = {})", i, jobs);

    let base = len / jobs;
    let rem = len % jobs;

    // Distribute the remainder to the first `rem` jobs
    let start = i * base + i.min(rem);
    let end = start + base + if i < rem { 1 } else { 0 };

    (start, end)
}

fn map_parallel<I, T, F>(inputs: &[I], jobs: usize, func: F) -> BatchResult<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T> + Sync,
{
    let len = inputs.len();
    let real_jobs = jobs.min(len);
    debug_println!("parallel processing: jobs {}", real_jobs);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(real_jobs)
        .thread_name(|t| format!("utf32_worker_{}", t))
        .start_handler(|t| {
            debug_println!("worker_{} init", t);
        })
        .exit_handler(|t| {
            debug_println!("worker_{} exit", t);
        })
        .build()?;

    let (send_result, get_result) = crossbeam_channel::unbounded();
    let func = &func;

    pool.scope(|s| {
        for job_idx in 0..real_jobs {
            let (range_start, range_stop) = make_range(len, real_jobs, job_idx);
            let send_result = send_result.clone();

            s.spawn(move |_| {
                debug_println!(
                    "job {} started, range {}, {}",
                    job_idx,
                    range_start,
                    range_stop
                );
                for i in range_start..range_stop {
                    if send_result.send((i, func(&inputs[i]))).is_err() {
                        break;
                    }
                }
            });
        }
    });
    // every worker has finished; close our side so the iterator terminates
    drop(send_result);

    Ok(get_result
        .into_iter()
        .sorted_by_key(|(i, _)| *i)
        .map(|(_, result)| result)
        .collect())
}
