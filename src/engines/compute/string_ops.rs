//! Byte-level sequence operations
//!
//! Normalization, reversal, complementing and transcription of nucleotide
//! sequences. Everything here works on raw bytes and never fails.

use crate::modules::seq::alphabet::NucleotideAlphabet;

/// Trim surrounding ASCII whitespace and uppercase a raw sequence
pub fn normalize(sequence: &[u8]) -> Vec<u8> {
    sequence.trim_ascii().to_ascii_uppercase()
}

/// Reverse a sequence in-place
pub fn reverse_in_place(sequence: &mut [u8]) {
    sequence.reverse();
}

/// Reverse a sequence, returning a new vector
pub fn reverse(sequence: &[u8]) -> Vec<u8> {
    let mut result = sequence.to_vec();
    reverse_in_place(&mut result);
    result
}

/// Complement a nucleotide sequence in-place using the given alphabet
pub fn complement_in_place(sequence: &mut [u8], alphabet: NucleotideAlphabet) {
    for base in sequence.iter_mut() {
        *base = alphabet.complement(*base);
    }
}

/// Complement a nucleotide sequence, detecting DNA vs RNA
pub fn complement(sequence: &[u8]) -> Vec<u8> {
    let mut result = sequence.to_vec();
    complement_in_place(&mut result, NucleotideAlphabet::detect(sequence));
    result
}

/// Reverse-complement a nucleotide sequence in-place, detecting DNA vs RNA
pub fn reverse_complement_in_place(sequence: &mut [u8]) {
    let alphabet = NucleotideAlphabet::detect(sequence);
    reverse_in_place(sequence);
    complement_in_place(sequence, alphabet);
}

/// Reverse-complement a nucleotide sequence, returning a new vector
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    let mut result = sequence.to_vec();
    reverse_complement_in_place(&mut result);
    result
}

/// Transcribe DNA to RNA (T -> U)
pub fn transcribe(dna: &[u8]) -> Vec<u8> {
    dna.iter()
        .map(|&base| match base {
            b'T' => b'U',
            b't' => b'u',
            _ => base,
        })
        .collect()
}

/// Reverse-transcribe RNA to DNA (U -> T)
pub fn reverse_transcribe(rna: &[u8]) -> Vec<u8> {
    rna.iter()
        .map(|&base| match base {
            b'U' => b'T',
            b'u' => b't',
            _ => base,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(b"  acgTN\n"), b"ACGTN");
        assert_eq!(normalize(b"\t\r\n"), b"");
        assert_eq!(normalize(b"ac gt"), b"AC GT");
    }

    #[test]
    fn test_reverse() {
        let seq = b"ACGT";
        let reversed = reverse(seq);
        assert_eq!(reversed, b"TGCA");

        let mut seq_mut = b"ACGT".to_vec();
        reverse_in_place(&mut seq_mut);
        assert_eq!(seq_mut, b"TGCA");
    }

    #[test]
    fn test_complement() {
        assert_eq!(complement(b"ACGT"), b"TGCA");
        assert_eq!(complement(b"ACGU"), b"UGCA");
        assert_eq!(complement(b"acgtn"), b"tgcan");
    }

    #[test]
    fn test_reverse_complement_dna() {
        assert_eq!(reverse_complement(b"ACGT"), b"ACGT");
        assert_eq!(reverse_complement(b"AACGTT"), b"AACGTT");
        assert_eq!(reverse_complement(b"ATGGCC"), b"GGCCAT");
        assert_eq!(reverse_complement(b"AAACCN"), b"NGGTTT");

        let mut seq_mut = b"ATGC".to_vec();
        reverse_complement_in_place(&mut seq_mut);
        assert_eq!(seq_mut, b"GCAT");
    }

    #[test]
    fn test_reverse_complement_rna() {
        assert_eq!(reverse_complement(b"AUGGCC"), b"GGCCAU");
        assert_eq!(reverse_complement(b"aug"), b"cau");
    }

    #[test]
    fn test_reverse_complement_passes_unknown_through() {
        assert_eq!(reverse_complement(b"AR-T"), b"A-RT");
        assert_eq!(reverse_complement(b""), b"");
    }

    #[test]
    fn test_transcription() {
        assert_eq!(transcribe(b"ACGT"), b"ACGU");
        assert_eq!(transcribe(b"ACGt"), b"ACGu");
        assert_eq!(reverse_transcribe(b"ACGU"), b"ACGT");
        assert_eq!(reverse_transcribe(b"acgu"), b"acgt");
    }

    proptest! {
        #[test]
        fn prop_reverse_complement_is_involution(seq in "[ACGTNacgtn]{0,200}") {
            let twice = reverse_complement(&reverse_complement(seq.as_bytes()));
            prop_assert_eq!(twice, seq.as_bytes().to_vec());
        }

        #[test]
        fn prop_rna_reverse_complement_is_involution(seq in "[ACGUNacgun]{0,200}") {
            let twice = reverse_complement(&reverse_complement(seq.as_bytes()));
            prop_assert_eq!(twice, seq.as_bytes().to_vec());
        }
    }
}
