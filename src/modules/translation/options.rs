//! Translation options
//!
//! One options struct drives every translation path. Fields that only one
//! path reads (`chunk_size` for streams, `num_workers` for parallel batches)
//! are optional and fall back to engine defaults.

use serde::{Deserialize, Serialize};

use crate::engines::core::parallel::default_num_threads;
use crate::engines::core::stream::DEFAULT_CHUNK_SIZE;
use crate::engines::{EngineError, EngineResult};
use crate::modules::genetic_code::{resolve_table, DEFAULT_TABLE};

/// Configuration for a translation call
///
/// ```rust
/// use biotranslate_rust::TranslationOptions;
///
/// let options = TranslationOptions::default()
///     .with_table("11")
///     .with_all_frames(true)
///     .with_include_reverse(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationOptions {
    /// Table identifier: canonical name or NCBI number
    pub table: String,
    /// Symbol emitted for a stop codon
    pub stop_symbol: char,
    /// Stop translating a frame at its first stop codon
    pub break_on_stop: bool,
    /// Translate offsets 0, 1 and 2 instead of only 0
    pub all_frames: bool,
    /// Also translate the reverse complement
    pub include_reverse: bool,
    /// Window size for stream translation
    pub chunk_size: Option<usize>,
    /// Worker count for parallel batches
    pub num_workers: Option<usize>,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            stop_symbol: '*',
            break_on_stop: true,
            all_frames: false,
            include_reverse: false,
            chunk_size: None,
            num_workers: None,
        }
    }
}

impl TranslationOptions {
    pub fn with_table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn with_stop_symbol(mut self, stop_symbol: char) -> Self {
        self.stop_symbol = stop_symbol;
        self
    }

    pub fn with_break_on_stop(mut self, break_on_stop: bool) -> Self {
        self.break_on_stop = break_on_stop;
        self
    }

    pub fn with_all_frames(mut self, all_frames: bool) -> Self {
        self.all_frames = all_frames;
        self
    }

    pub fn with_include_reverse(mut self, include_reverse: bool) -> Self {
        self.include_reverse = include_reverse;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    /// Check every option before any work starts
    pub fn validate(&self) -> EngineResult<()> {
        resolve_table(&self.table)?;

        if self.chunk_size == Some(0) {
            return Err(EngineError::InvalidOption(
                "chunk_size must be a positive integer".to_string(),
            ));
        }

        if self.num_workers == Some(0) {
            return Err(EngineError::InvalidOption(
                "num_workers must be a positive integer".to_string(),
            ));
        }

        Ok(())
    }

    /// Stream window size, falling back to `DEFAULT_CHUNK_SIZE`
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Parallel worker count, falling back to the hardware concurrency
    pub fn effective_num_workers(&self) -> usize {
        self.num_workers.unwrap_or_else(default_num_threads)
    }

    /// Number of results produced per non-empty sequence
    pub fn frames_per_sequence(&self) -> usize {
        let per_strand = if self.all_frames { 3 } else { 1 };
        if self.include_reverse {
            per_strand * 2
        } else {
            per_strand
        }
    }
}
