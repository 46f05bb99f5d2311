//! Record-level translation
//!
//! Sequence records arrive already parsed and normalized by an upstream
//! FASTA/FASTQ reader. Translation keeps each record's id next to its frames
//! so callers can write protein records back out under the same names.

use serde::{Deserialize, Serialize};

use crate::modules::translation::{TranslationResult, Translator};

/// A parsed sequence record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Sequence identifier
    pub id: String,
    /// Nucleotide sequence
    pub sequence: String,
    /// Per-base qualities (FASTQ only)
    pub quality: Option<String>,
}

impl SequenceRecord {
    /// Create a new record without qualities
    pub fn new(id: &str, sequence: &str) -> Self {
        Self {
            id: id.to_string(),
            sequence: sequence.to_string(),
            quality: None,
        }
    }

    /// Attach per-base qualities
    pub fn with_quality(mut self, quality: &str) -> Self {
        self.quality = Some(quality.to_string());
        self
    }
}

/// The frames of one translated record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTranslation {
    pub id: String,
    pub results: Vec<TranslationResult>,
}

impl RecordTranslation {
    /// Identifier for one frame, e.g. `read7_+1` or `read7_-3`
    pub fn frame_id(&self, result: &TranslationResult) -> String {
        format!("{}_{}", self.id, result.frame_label())
    }
}

/// Translate records in order
pub fn translate_records(
    translator: &Translator,
    records: &[SequenceRecord],
) -> Vec<RecordTranslation> {
    records
        .iter()
        .map(|record| RecordTranslation {
            id: record.id.clone(),
            results: translator.translate(&record.sequence),
        })
        .collect()
}
