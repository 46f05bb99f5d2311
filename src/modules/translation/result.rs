//! Translation results

use serde::{Deserialize, Serialize};

/// The translation of one (frame, strand) pair.
///
/// Frames 0-2 are forward offsets from the 5' end; frames 3-5 apply the same
/// offsets to the reverse complement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Residues, including stop and unknown symbols
    pub sequence: String,
    /// Frame index, 0..=5
    pub frame: u8,
    /// Whether the frame was read from the reverse complement
    pub is_reverse: bool,
    /// Length of the nucleotide input that was translated
    pub source_length: usize,
}

impl TranslationResult {
    /// Result for `offset` (0..=2) on the forward or reverse strand
    pub fn new(sequence: String, offset: usize, is_reverse: bool, source_length: usize) -> Self {
        let frame = offset as u8 + if is_reverse { 3 } else { 0 };
        Self {
            sequence,
            frame,
            is_reverse,
            source_length,
        }
    }

    /// Offset into the (possibly reverse-complemented) sequence
    pub fn offset(&self) -> usize {
        (self.frame % 3) as usize
    }

    /// Conventional frame label: `+1`..`+3` forward, `-1`..`-3` reverse
    pub fn frame_label(&self) -> String {
        let sign = if self.is_reverse { '-' } else { '+' };
        format!("{}{}", sign, self.offset() + 1)
    }

    /// Number of residues
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
