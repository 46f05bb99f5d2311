//! Execution engines
//!
//! The `compute` tree holds the pure translation primitives; the `core` tree
//! holds the execution machinery built on top of them (parallel batches,
//! the long-lived worker pool and the boundary-aligned stream translator).

pub mod compute;
pub mod core;

use thiserror::Error;

use crate::modules::genetic_code::{lookup_for, DEFAULT_TABLE};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error types for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// The table identifier matched neither a canonical name nor an NCBI id
    #[error("Unknown genetic code table '{identifier}' (valid identifiers: {valid})")]
    UnknownTable { identifier: String, valid: String },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// An execution unit panicked while running a task
    #[error("Worker failure: {0}")]
    WorkerFailure(String),

    /// The task was dropped before it produced a result
    #[error("Task {0} was abandoned before completion")]
    TaskAbandoned(u64),

    #[error("Worker pool has been terminated")]
    PoolTerminated,

    #[error("Worker pool has no live workers left")]
    NoLiveWorkers,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// The upstream chunk source of a stream failed
    #[error("Stream source error: {0}")]
    StreamSource(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl EngineError {
    /// Whether the error is a configuration problem detected before any work started
    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::UnknownTable { .. } | EngineError::InvalidOption(_))
    }
}

/// Initialize the engines
///
/// Compiles the lookup for the default table so the first translation call
/// does not pay for it.
pub fn initialize() -> EngineResult<()> {
    let lookup = lookup_for(DEFAULT_TABLE)?;
    log::debug!(
        "Engines initialized (default lookup has {} codon spellings)",
        lookup.len()
    );
    Ok(())
}
