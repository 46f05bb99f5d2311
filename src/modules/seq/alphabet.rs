//! Nucleotide alphabets
//!
//! Translation accepts both DNA and RNA spellings. The only place the two
//! differ in behavior is base complementing, so detection is deliberately
//! simple: any `U`/`u` makes a sequence RNA.

use serde::{Deserialize, Serialize};

/// Nucleotide alphabet type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NucleotideAlphabet {
    #[default]
    DNA,
    RNA,
}

impl NucleotideAlphabet {
    /// Detect the alphabet of a sequence
    pub fn detect(sequence: &[u8]) -> Self {
        if sequence.iter().any(|&b| b == b'U' || b == b'u') {
            NucleotideAlphabet::RNA
        } else {
            NucleotideAlphabet::DNA
        }
    }

    /// Watson-Crick complement of a single base, preserving case.
    ///
    /// `N` maps to itself; any other byte (IUPAC ambiguity codes, gaps,
    /// the other alphabet's `T`/`U`) passes through unchanged.
    #[inline]
    pub fn complement(&self, base: u8) -> u8 {
        match (self, base) {
            (_, b'G') => b'C',
            (_, b'g') => b'c',
            (_, b'C') => b'G',
            (_, b'c') => b'g',
            (NucleotideAlphabet::DNA, b'A') => b'T',
            (NucleotideAlphabet::DNA, b'a') => b't',
            (NucleotideAlphabet::DNA, b'T') => b'A',
            (NucleotideAlphabet::DNA, b't') => b'a',
            (NucleotideAlphabet::RNA, b'A') => b'U',
            (NucleotideAlphabet::RNA, b'a') => b'u',
            (NucleotideAlphabet::RNA, b'U') => b'A',
            (NucleotideAlphabet::RNA, b'u') => b'a',
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(NucleotideAlphabet::detect(b"ACGT"), NucleotideAlphabet::DNA);
        assert_eq!(NucleotideAlphabet::detect(b"ACGU"), NucleotideAlphabet::RNA);
        assert_eq!(NucleotideAlphabet::detect(b"acgu"), NucleotideAlphabet::RNA);
        assert_eq!(NucleotideAlphabet::detect(b""), NucleotideAlphabet::DNA);
        assert_eq!(NucleotideAlphabet::detect(b"NNNN"), NucleotideAlphabet::DNA);
    }

    #[test]
    fn test_complement() {
        let dna = NucleotideAlphabet::DNA;
        assert_eq!(dna.complement(b'A'), b'T');
        assert_eq!(dna.complement(b't'), b'a');
        assert_eq!(dna.complement(b'N'), b'N');
        assert_eq!(dna.complement(b'n'), b'n');
        assert_eq!(dna.complement(b'R'), b'R');

        let rna = NucleotideAlphabet::RNA;
        assert_eq!(rna.complement(b'A'), b'U');
        assert_eq!(rna.complement(b'u'), b'a');
        assert_eq!(rna.complement(b'G'), b'C');
        assert_eq!(rna.complement(b'-'), b'-');
    }

    #[test]
    fn test_default_is_dna() {
        assert_eq!(NucleotideAlphabet::default(), NucleotideAlphabet::DNA);
    }
}
