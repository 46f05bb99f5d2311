//! Compute primitives for translation
//!
//! Pure, allocation-light functions over byte sequences. Nothing here fails:
//! unknown codons degrade to `X` instead of erroring.

pub mod string_ops;
pub mod translate;
