//! Nucleotide to amino-acid translation
//!
//! Translates DNA and RNA with any NCBI genetic code, one sequence at a time,
//! in batches (sequential, parallel, or on a long-lived worker pool), or as
//! an unbounded stream of chunks.
//!
//! ```rust
//! use biotranslate_rust::{translate, TranslationOptions};
//!
//! let options = TranslationOptions::default();
//! let results = translate("ATGGCCAAA", &options).unwrap();
//! assert_eq!(results[0].sequence, "MAK");
//! ```

pub mod engines;
pub mod modules;

pub use engines::compute::string_ops::reverse_complement;
pub use engines::compute::translate::translate_frame;
#[cfg(feature = "parallel")]
pub use engines::core::parallel::par_translate_batch;
pub use engines::core::parallel::translate_parallel;
pub use engines::core::io::ChunkReader;
pub use engines::core::pool::{PoolState, TaskHandle, WorkerPool};
pub use engines::core::stream::{StreamCursor, StreamState, StreamTranslator};
pub use engines::{initialize, EngineError, EngineResult};
pub use modules::genetic_code::{all_tables, lookup_for, resolve_table, CodonTable, CompiledLookup};
pub use modules::io::{translate_records, RecordTranslation, SequenceRecord};
pub use modules::translation::{TranslationOptions, TranslationResult, Translator};

/// Translate one sequence into the frames `options` asks for
pub fn translate<S: AsRef<[u8]>>(
    sequence: S,
    options: &TranslationOptions,
) -> EngineResult<Vec<TranslationResult>> {
    Ok(Translator::new(options.clone())?.translate(sequence))
}

/// Translate a batch sequentially, index-aligned with `sequences`
pub fn translate_batch<S: AsRef<[u8]>>(
    sequences: &[S],
    options: &TranslationOptions,
) -> EngineResult<Vec<Vec<TranslationResult>>> {
    Ok(Translator::new(options.clone())?.translate_batch(sequences))
}

/// Translate a chunk source as one contiguous forward frame 0.
///
/// Configuration errors are reported here, before the first chunk is pulled.
pub fn translate_stream<I>(
    source: I,
    options: &TranslationOptions,
) -> EngineResult<StreamTranslator<I::IntoIter>>
where
    I: IntoIterator,
{
    Ok(Translator::new(options.clone())?.translate_stream(source))
}
