//! Codon-to-residue translation
//!
//! `translate_frame` is the atomic unit of work: one reading frame of one
//! in-memory sequence. `translate_sequence` enumerates the requested frames
//! and strands on top of it.

use super::string_ops;
use crate::modules::genetic_code::{CompiledLookup, Residue};
use crate::modules::translation::{TranslationOptions, TranslationResult};

/// Symbol emitted for a codon the lookup does not know
pub const UNKNOWN_RESIDUE: char = 'X';

/// Translate one frame, appending residues to `out`.
///
/// Returns `true` if translation halted on a stop codon (only possible when
/// `break_on_stop` is set).
pub(crate) fn translate_frame_into(
    sequence: &[u8],
    lookup: &CompiledLookup,
    stop_symbol: char,
    break_on_stop: bool,
    offset: usize,
    out: &mut String,
) -> bool {
    let Some(frame) = sequence.get(offset..) else {
        return false;
    };
    out.reserve(frame.len() / 3);

    for window in frame.chunks_exact(3) {
        let codon = [
            window[0].to_ascii_uppercase(),
            window[1].to_ascii_uppercase(),
            window[2].to_ascii_uppercase(),
        ];
        match lookup.get(&codon) {
            Some(Residue::Amino(residue)) => out.push(residue as char),
            Some(Residue::Stop) => {
                out.push(stop_symbol);
                if break_on_stop {
                    return true;
                }
            }
            None => out.push(UNKNOWN_RESIDUE),
        }
    }

    false
}

/// Translate the reading frame starting at `offset`.
///
/// Consumes non-overlapping codons while at least three bases remain; a
/// trailing partial codon is dropped. Unknown codons become `X`. With
/// `break_on_stop`, the first stop codon is emitted and ends the frame.
pub fn translate_frame(
    sequence: &[u8],
    lookup: &CompiledLookup,
    stop_symbol: char,
    break_on_stop: bool,
    offset: usize,
) -> String {
    let mut protein = String::new();
    translate_frame_into(sequence, lookup, stop_symbol, break_on_stop, offset, &mut protein);
    protein
}

fn translate_strand(
    strand: &[u8],
    is_reverse: bool,
    lookup: &CompiledLookup,
    options: &TranslationOptions,
    results: &mut Vec<TranslationResult>,
) {
    let offsets = if options.all_frames { 0..3 } else { 0..1 };
    for offset in offsets {
        let protein = translate_frame(
            strand,
            lookup,
            options.stop_symbol,
            options.break_on_stop,
            offset,
        );
        results.push(TranslationResult::new(protein, offset, is_reverse, strand.len()));
    }
}

/// Translate one raw sequence into every requested (frame, strand) pair.
///
/// The input is trimmed and uppercased first. Results come forward frames
/// first, then reverse-complement frames (numbered 3..=5). An empty input
/// yields no results.
pub fn translate_sequence(
    sequence: &[u8],
    lookup: &CompiledLookup,
    options: &TranslationOptions,
) -> Vec<TranslationResult> {
    let normalized = string_ops::normalize(sequence);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::with_capacity(options.frames_per_sequence());
    translate_strand(&normalized, false, lookup, options, &mut results);

    if options.include_reverse {
        let reverse = string_ops::reverse_complement(&normalized);
        translate_strand(&reverse, true, lookup, options, &mut results);
    }

    results
}

/// Translate a batch sequentially, one result list per input sequence
pub fn translate_batch<S: AsRef<[u8]>>(
    sequences: &[S],
    lookup: &CompiledLookup,
    options: &TranslationOptions,
) -> Vec<Vec<TranslationResult>> {
    sequences
        .iter()
        .map(|sequence| translate_sequence(sequence.as_ref(), lookup, options))
        .collect()
}
