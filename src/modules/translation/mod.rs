//! Translation module
//!
//! `Translator` binds a set of options to a compiled lookup once and reuses
//! it for every sequence, batch or stream it is handed.

pub mod options;
pub mod result;

use std::sync::Arc;

use crate::engines::compute::translate;
use crate::engines::core::stream::{StreamCursor, StreamTranslator};
use crate::engines::EngineResult;
use crate::modules::genetic_code::{lookup_for, CompiledLookup};

/// Convenience re-exports
pub use options::TranslationOptions;
pub use result::TranslationResult;

/// Validated options plus their compiled lookup
#[derive(Debug, Clone)]
pub struct Translator {
    options: TranslationOptions,
    lookup: Arc<CompiledLookup>,
}

impl Translator {
    /// Validate `options` and bind the lookup for its table.
    ///
    /// Configuration errors surface here, before any sequence is touched.
    pub fn new(options: TranslationOptions) -> EngineResult<Self> {
        options.validate()?;
        let lookup = lookup_for(&options.table)?;
        Ok(Self { options, lookup })
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    pub fn lookup(&self) -> &CompiledLookup {
        &self.lookup
    }

    /// Translate a single frame of a sequence as-is (no trimming)
    pub fn translate_frame(&self, sequence: &[u8], offset: usize) -> String {
        translate::translate_frame(
            sequence,
            &self.lookup,
            self.options.stop_symbol,
            self.options.break_on_stop,
            offset,
        )
    }

    /// Translate one sequence into its requested frames
    pub fn translate<S: AsRef<[u8]>>(&self, sequence: S) -> Vec<TranslationResult> {
        translate::translate_sequence(sequence.as_ref(), &self.lookup, &self.options)
    }

    /// Translate a batch sequentially, index-aligned with `sequences`
    pub fn translate_batch<S: AsRef<[u8]>>(&self, sequences: &[S]) -> Vec<Vec<TranslationResult>> {
        translate::translate_batch(sequences, &self.lookup, &self.options)
    }

    /// Fresh push-style stream cursor
    pub fn stream_cursor(&self) -> StreamCursor {
        StreamCursor::new(
            Arc::clone(&self.lookup),
            self.options.stop_symbol,
            self.options.break_on_stop,
            self.options.effective_chunk_size(),
        )
    }

    /// Translate a pull-style chunk source as one contiguous forward frame
    pub fn translate_stream<I>(&self, source: I) -> StreamTranslator<I::IntoIter>
    where
        I: IntoIterator,
    {
        StreamTranslator::new(source.into_iter(), self.stream_cursor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::EngineError;

    #[test]
    fn test_translator_reuses_lookup() {
        let translator = Translator::new(TranslationOptions::default()).unwrap();
        assert_eq!(translator.lookup().table_id(), 1);
        assert_eq!(translator.translate("ATGGCCAAA")[0].sequence, "MAK");
        assert_eq!(translator.translate(b"TTTGGG".to_vec())[0].sequence, "FG");
        assert_eq!(translator.translate_frame(b"AATGTTTTAG", 1), "MF*");
    }

    #[test]
    fn test_translator_rejects_bad_options() {
        let err = Translator::new(TranslationOptions::default().with_table("99")).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTable { .. }));
        assert!(err.is_configuration());

        let err = Translator::new(TranslationOptions::default().with_chunk_size(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidOption(_)));
    }

    #[test]
    fn test_translator_batch() {
        let translator =
            Translator::new(TranslationOptions::default().with_all_frames(true)).unwrap();
        let results = translator.translate_batch(&["ATGGCCAAA", "AAATTT"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].len(), 3);
        assert_eq!(results[1][0].sequence, "KF");
    }
}
