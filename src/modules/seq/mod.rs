//! Sequence module
//!
//! Nucleotide alphabet handling.

pub mod alphabet;

/// Convenience re-exports
pub use alphabet::NucleotideAlphabet;
