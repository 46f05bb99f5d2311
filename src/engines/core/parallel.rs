//! Parallel batch translation
//!
//! Two stateless ways to spread a batch across cores. `translate_parallel`
//! partitions the batch into contiguous slices and runs each on its own
//! short-lived thread; `par_translate_batch` (feature `parallel`) hands the
//! batch to a shared rayon pool. Both return results index-aligned with the
//! input regardless of which slice finishes first.

use std::any::Any;
use std::io;
use std::ops::Range;
use std::thread::{self, ScopedJoinHandle};

use crate::engines::{EngineError, EngineResult};
use crate::modules::translation::{TranslationOptions, TranslationResult, Translator};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use rayon::{ThreadPool, ThreadPoolBuilder};
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
static GLOBAL_POOL: OnceLock<ThreadPool> = OnceLock::new();

/// Get the default number of threads to use
pub fn default_num_threads() -> usize {
    num_cpus::get()
}

/// Initialize the shared rayon pool used by `par_translate_batch`
#[cfg(feature = "parallel")]
pub fn initialize_thread_pool() -> EngineResult<()> {
    global_pool().map(|_| ())
}

/// Get the shared rayon pool, building it on first use
#[cfg(feature = "parallel")]
pub fn global_pool() -> EngineResult<&'static ThreadPool> {
    if let Some(pool) = GLOBAL_POOL.get() {
        return Ok(pool);
    }

    let num_threads = default_num_threads();
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|idx| format!("translate-worker-{}", idx))
        .build()
        .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

    // Another thread may have won the race; its pool is used instead
    if GLOBAL_POOL.set(pool).is_ok() {
        log::info!("Initialized thread pool with {} threads", num_threads);
    }
    GLOBAL_POOL
        .get()
        .ok_or_else(|| EngineError::ThreadPool("Thread pool not initialized".to_string()))
}

/// Split `len` items into at most `parts` contiguous, near-equal ranges
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 || parts == 0 {
        return Vec::new();
    }

    let parts = parts.min(len);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Render a panic payload as text
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Join slice threads in slice order and concatenate their outputs.
///
/// Every handle is joined, even when `spawn_error` is set, so a panicking
/// slice becomes an error instead of a scope panic. A spawn error wins over a
/// slice failure.
fn join_in_order<R>(
    handles: Vec<ScopedJoinHandle<'_, Vec<R>>>,
    spawn_error: Option<io::Error>,
) -> EngineResult<Vec<R>> {
    let mut output = Vec::new();
    let mut failure = None;
    for handle in handles {
        match handle.join() {
            Ok(results) => output.extend(results),
            Err(payload) => {
                failure.get_or_insert_with(|| panic_message(payload.as_ref()));
            }
        }
    }

    if let Some(e) = spawn_error {
        return Err(EngineError::Spawn(e));
    }
    match failure {
        Some(msg) => Err(EngineError::WorkerFailure(msg)),
        None => Ok(output),
    }
}

/// Run `process` over `workers` contiguous slices of `items` on scoped
/// threads and concatenate the per-slice outputs in slice order.
pub fn scoped_split_join<T, R, F>(items: &[T], workers: usize, process: F) -> EngineResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> Vec<R> + Sync,
{
    let ranges = partition(items.len(), workers);
    if ranges.is_empty() {
        return Ok(Vec::new());
    }

    let process = &process;
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(ranges.len());
        let mut spawn_error = None;
        for (idx, range) in ranges.into_iter().enumerate() {
            let slice = &items[range];
            match thread::Builder::new()
                .name(format!("translate-slice-{}", idx))
                .spawn_scoped(scope, move || process(slice))
            {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    log::warn!("Failed to spawn slice thread {}: {}", idx, e);
                    spawn_error = Some(e);
                    break;
                }
            }
        }

        join_in_order(handles, spawn_error)
    })
}

/// Translate a batch on `options.num_workers` ephemeral threads.
///
/// The batch is partitioned into contiguous slices, one per thread; results
/// come back index-aligned with `sequences`.
pub fn translate_parallel<S>(
    sequences: &[S],
    options: &TranslationOptions,
) -> EngineResult<Vec<Vec<TranslationResult>>>
where
    S: AsRef<[u8]> + Sync,
{
    let translator = Translator::new(options.clone())?;
    let workers = options.effective_num_workers();
    log::debug!(
        "Translating {} sequences across {} slices",
        sequences.len(),
        workers.min(sequences.len())
    );
    scoped_split_join(sequences, workers, |slice| translator.translate_batch(slice))
}

/// Translate a batch on the shared rayon pool, preserving input order
#[cfg(feature = "parallel")]
pub fn par_translate_batch<S>(
    sequences: &[S],
    options: &TranslationOptions,
) -> EngineResult<Vec<Vec<TranslationResult>>>
where
    S: AsRef<[u8]> + Sync,
{
    let translator = Translator::new(options.clone())?;
    let pool = global_pool()?;
    Ok(pool.install(|| {
        sequences
            .par_iter()
            .map(|sequence| translator.translate(sequence))
            .collect()
    }))
}
